use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mstrans_config::ClientConfig;
use mstrans_http::HttpTransport;

use crate::error::{CallError, CallResult, ClientError, ValidationError};
use crate::options::{OptionValue, Options};
use crate::query::build_query;
use crate::registry::{PendingCallbacks, RequestId};
use crate::specs::{self, OperationSpec};
use crate::validate::validate;

/// Calls the Translator V2 Ajax endpoints.
///
/// Every operation validates its options, builds the request URL, and
/// returns a [`RequestId`] right away; the exchange itself runs on a
/// spawned task and its outcome goes to the completion handler registered
/// in the options. Methods must therefore run inside a Tokio runtime.
pub struct TranslatorClient {
    api_base: String,
    access_token: String,
    online: AtomicBool,
    transport: Arc<dyn HttpTransport>,
    pending: Arc<PendingCallbacks>,
}

impl TranslatorClient {
    /// `access_token` is the raw bearer token from the token broker. It is
    /// injected as `appId` into every call that does not carry its own.
    pub fn new(
        config: ClientConfig,
        access_token: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            online: AtomicBool::new(config.online),
            transport,
            pending: Arc::new(PendingCallbacks::new()),
        }
    }

    /// Marks the client online or offline. While offline every operation
    /// fails fast with [`ClientError::Offline`] and nothing goes on the
    /// wire.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
        tracing::debug!(
            "connectivity set to {}",
            if online { "online" } else { "offline" }
        );
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    /// Calls whose handlers have not run yet.
    pub fn pending_calls(&self) -> usize {
        self.pending.pending()
    }

    /// Translates `text` into the `to` language.
    ///
    /// Options: `text` required; `from` optional; `to` defaults to `"en"`;
    /// `contentType` defaults to `"text/plain"`; `category` optional. The
    /// handler receives the translation as a JSON string.
    pub fn translate(&self, options: Options) -> Result<RequestId, ClientError> {
        self.call(&specs::TRANSLATE, options)
    }

    /// Translates every entry of `texts` in one round trip.
    ///
    /// Options: `texts` required list; `from` optional; `to` defaults to
    /// `"en"`; `options` optional object of service-side settings.
    pub fn translate_array(&self, options: Options) -> Result<RequestId, ClientError> {
        self.call(&specs::TRANSLATE_ARRAY, options)
    }

    /// Detects the language of `text`. The handler receives a language
    /// code string.
    pub fn detect(&self, options: Options) -> Result<RequestId, ClientError> {
        self.call(&specs::DETECT, options)
    }

    /// Detects the language of every entry of `texts`.
    pub fn detect_array(&self, options: Options) -> Result<RequestId, ClientError> {
        self.call(&specs::DETECT_ARRAY, options)
    }

    /// Splits `text` (in `language`) into sentences. The handler receives
    /// the sentence lengths as a JSON array of integers.
    pub fn break_sentences(&self, options: Options) -> Result<RequestId, ClientError> {
        self.call(&specs::BREAK_SENTENCES, options)
    }

    /// Lists the language codes the service can translate between.
    pub fn languages_for_translate(&self, options: Options) -> Result<RequestId, ClientError> {
        self.call(&specs::LANGUAGES_FOR_TRANSLATE, options)
    }

    /// Lists the language codes the service can speak.
    pub fn languages_for_speak(&self, options: Options) -> Result<RequestId, ClientError> {
        self.call(&specs::LANGUAGES_FOR_SPEAK, options)
    }

    /// Resolves language codes to display names in `locale`.
    ///
    /// Options: `locale` required; `languageCodes` optional list of codes
    /// to resolve.
    pub fn language_names(&self, options: Options) -> Result<RequestId, ClientError> {
        self.call(&specs::LANGUAGE_NAMES, options)
    }

    /// Renders `text` (in `language`) as speech.
    ///
    /// Options: `text` and `language` required; `format` defaults to
    /// `"audio/wav"`; `options` optional rendering flags. The handler
    /// receives a URL to the rendered audio.
    pub fn speak(&self, options: Options) -> Result<RequestId, ClientError> {
        self.call(&specs::SPEAK, options)
    }

    /// Declared by the service but unsupported here; always fails with
    /// [`ClientError::NotImplemented`].
    pub fn add_translation(&self, _options: Options) -> Result<RequestId, ClientError> {
        self.not_implemented("AddTranslation")
    }

    /// Declared by the service but unsupported here.
    pub fn add_translation_array(&self, _options: Options) -> Result<RequestId, ClientError> {
        self.not_implemented("AddTranslationArray")
    }

    /// Declared by the service but unsupported here.
    pub fn get_translations(&self, _options: Options) -> Result<RequestId, ClientError> {
        self.not_implemented("GetTranslations")
    }

    /// Declared by the service but unsupported here.
    pub fn get_translations_array(&self, _options: Options) -> Result<RequestId, ClientError> {
        self.not_implemented("GetTranslationsArray")
    }

    fn call(
        &self,
        operation: &'static OperationSpec,
        mut options: Options,
    ) -> Result<RequestId, ClientError> {
        if !self.is_online() {
            tracing::debug!("{}: offline, call not attempted", operation.name);
            return Err(ClientError::Offline {
                operation: operation.name,
            });
        }

        if options.get(specs::APP_ID).is_none() {
            options.insert(
                specs::APP_ID,
                OptionValue::Text(self.access_token.clone()),
            );
        }
        validate(operation.name, &mut options, operation.params)?;

        let query = build_query(operation.params, &options);
        let url = format!("{}/{}?{}", self.api_base, operation.name, query);

        // Every operation table requires the callback, so validation has
        // already guaranteed a handler here.
        let Some(handler) = options.take_handler() else {
            return Err(ClientError::Validation(ValidationError::missing(
                operation.name,
                specs::CALLBACK,
            )));
        };

        let id = self.pending.register(handler);
        tracing::debug!("{} dispatched as request {}", operation.name, id);

        let transport = Arc::clone(&self.transport);
        let pending = Arc::clone(&self.pending);
        let name = operation.name;
        tokio::spawn(async move {
            let result = exchange(transport.as_ref(), &url).await;
            if let Err(err) = &result {
                tracing::debug!("{} request {} failed: {}", name, id, err);
            }
            pending.resolve(id, result);
        });

        Ok(id)
    }

    fn not_implemented(&self, operation: &'static str) -> Result<RequestId, ClientError> {
        tracing::warn!("{} was called but is not implemented", operation);
        Err(ClientError::NotImplemented { operation })
    }
}

/// Runs the GET and decodes the payload. The service prefixes its JSON
/// with a UTF-8 byte order mark, which serde rejects, so it is stripped
/// before decoding.
async fn exchange(transport: &dyn HttpTransport, url: &str) -> CallResult {
    let response = transport.get(url).await.map_err(CallError::Transport)?;

    if !response.is_success() {
        return Err(CallError::Http {
            status: response.status,
            body: response.body.chars().take(200).collect(),
        });
    }

    let body = response.body.trim_start_matches('\u{feff}');
    Ok(serde_json::from_str(body)?)
}
