//! Parameter tables for the Ajax operations, one row per accepted option.
//!
//! Row order is also wire order: queries serialize parameters exactly as
//! listed here, which keeps request URLs stable across calls.

use crate::validate::{Kind, ParamSpec};

/// Token parameter, injected by the client when the caller leaves it out.
pub const APP_ID: &str = "appId";
/// Name under which the completion handler is validated. It never reaches
/// the wire.
pub const CALLBACK: &str = "callback";

pub(crate) struct OperationSpec {
    /// Path segment under the service base, e.g. `Translate`.
    pub name: &'static str,
    pub params: &'static [ParamSpec],
}

pub(crate) const TRANSLATE: OperationSpec = OperationSpec {
    name: "Translate",
    params: &[
        ParamSpec::required(APP_ID, Kind::Text),
        ParamSpec::required("text", Kind::Text),
        ParamSpec::optional("from", Kind::Text),
        ParamSpec::defaulted("to", Kind::Text, "en"),
        ParamSpec::defaulted("contentType", Kind::Text, "text/plain"),
        ParamSpec::optional("category", Kind::Text),
        ParamSpec::required(CALLBACK, Kind::Handler),
    ],
};

pub(crate) const TRANSLATE_ARRAY: OperationSpec = OperationSpec {
    name: "TranslateArray",
    params: &[
        ParamSpec::required(APP_ID, Kind::Text),
        ParamSpec::required("texts", Kind::List),
        ParamSpec::optional("from", Kind::Text),
        ParamSpec::defaulted("to", Kind::Text, "en"),
        ParamSpec::optional("options", Kind::Map),
        ParamSpec::required(CALLBACK, Kind::Handler),
    ],
};

pub(crate) const DETECT: OperationSpec = OperationSpec {
    name: "Detect",
    params: &[
        ParamSpec::required(APP_ID, Kind::Text),
        ParamSpec::required("text", Kind::Text),
        ParamSpec::required(CALLBACK, Kind::Handler),
    ],
};

pub(crate) const DETECT_ARRAY: OperationSpec = OperationSpec {
    name: "DetectArray",
    params: &[
        ParamSpec::required(APP_ID, Kind::Text),
        ParamSpec::required("texts", Kind::List),
        ParamSpec::required(CALLBACK, Kind::Handler),
    ],
};

pub(crate) const BREAK_SENTENCES: OperationSpec = OperationSpec {
    name: "BreakSentences",
    params: &[
        ParamSpec::required(APP_ID, Kind::Text),
        ParamSpec::required("text", Kind::Text),
        ParamSpec::required("language", Kind::Text),
        ParamSpec::required(CALLBACK, Kind::Handler),
    ],
};

pub(crate) const LANGUAGES_FOR_TRANSLATE: OperationSpec = OperationSpec {
    name: "GetLanguagesForTranslate",
    params: &[
        ParamSpec::required(APP_ID, Kind::Text),
        ParamSpec::required(CALLBACK, Kind::Handler),
    ],
};

pub(crate) const LANGUAGES_FOR_SPEAK: OperationSpec = OperationSpec {
    name: "GetLanguagesForSpeak",
    params: &[
        ParamSpec::required(APP_ID, Kind::Text),
        ParamSpec::required(CALLBACK, Kind::Handler),
    ],
};

pub(crate) const LANGUAGE_NAMES: OperationSpec = OperationSpec {
    name: "GetLanguageNames",
    params: &[
        ParamSpec::required(APP_ID, Kind::Text),
        ParamSpec::required("locale", Kind::Text),
        ParamSpec::optional("languageCodes", Kind::List),
        ParamSpec::required(CALLBACK, Kind::Handler),
    ],
};

pub(crate) const SPEAK: OperationSpec = OperationSpec {
    name: "Speak",
    params: &[
        ParamSpec::required(APP_ID, Kind::Text),
        ParamSpec::required("text", Kind::Text),
        ParamSpec::required("language", Kind::Text),
        ParamSpec::defaulted("format", Kind::Text, "audio/wav"),
        ParamSpec::optional("options", Kind::Text),
        ParamSpec::required(CALLBACK, Kind::Handler),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::validate::validate;

    fn all() -> [&'static OperationSpec; 9] {
        [
            &TRANSLATE,
            &TRANSLATE_ARRAY,
            &DETECT,
            &DETECT_ARRAY,
            &BREAK_SENTENCES,
            &LANGUAGES_FOR_TRANSLATE,
            &LANGUAGES_FOR_SPEAK,
            &LANGUAGE_NAMES,
            &SPEAK,
        ]
    }

    #[test]
    fn every_operation_leads_with_the_token_and_ends_with_the_handler() {
        for op in all() {
            let first = op.params.first().map(|spec| spec.name);
            let last = op.params.last().map(|spec| spec.name);
            assert_eq!(first, Some(APP_ID), "{}", op.name);
            assert_eq!(last, Some(CALLBACK), "{}", op.name);
        }
    }

    #[test]
    fn translate_fills_target_language_and_content_type() {
        let mut options = Options::new()
            .set(APP_ID, "token")
            .set("text", "hello")
            .on_result(|_| {});

        validate(TRANSLATE.name, &mut options, TRANSLATE.params).unwrap();
        assert_eq!(options.text("to"), Some("en"));
        assert_eq!(options.text("contentType"), Some("text/plain"));
        assert!(options.get("from").is_none());
    }

    #[test]
    fn speak_defaults_to_wav_output() {
        let mut options = Options::new()
            .set(APP_ID, "token")
            .set("text", "hallo")
            .set("language", "nl")
            .on_result(|_| {});

        validate(SPEAK.name, &mut options, SPEAK.params).unwrap();
        assert_eq!(options.text("format"), Some("audio/wav"));
    }

    #[test]
    fn language_names_requires_a_locale() {
        let mut options = Options::new().set(APP_ID, "token").on_result(|_| {});

        let err = validate(LANGUAGE_NAMES.name, &mut options, LANGUAGE_NAMES.params).unwrap_err();
        assert_eq!(err.parameter, "locale");
        assert_eq!(err.operation, "GetLanguageNames");
    }

    #[test]
    fn break_sentences_needs_text_and_language() {
        let mut options = Options::new()
            .set(APP_ID, "token")
            .set("text", "One. Two.")
            .on_result(|_| {});

        let err =
            validate(BREAK_SENTENCES.name, &mut options, BREAK_SENTENCES.params).unwrap_err();
        assert_eq!(err.parameter, "language");
    }
}
