use crate::options::{OptionValue, Options};
use crate::specs::APP_ID;
use crate::validate::{Kind, ParamSpec};

/// Serializes validated options into the operation's query string.
///
/// Parameters appear in table order. The handler never serializes. The
/// `appId` value is sent as `Bearer <token>`, and list and map values go
/// out as JSON text. Every value is percent-encoded.
pub(crate) fn build_query(specs: &[ParamSpec], options: &Options) -> String {
    let mut pairs: Vec<String> = Vec::with_capacity(specs.len());

    for spec in specs {
        if spec.kind == Kind::Handler {
            continue;
        }
        let Some(value) = options.get(spec.name) else {
            continue;
        };

        let plain = match value {
            OptionValue::Text(text) if spec.name == APP_ID => format!("Bearer {text}"),
            OptionValue::Text(text) => text.clone(),
            OptionValue::List(items) => {
                serde_json::to_string(items).expect("string list serializes")
            }
            OptionValue::Map(map) => serde_json::to_string(map).expect("json map serializes"),
        };

        pairs.push(format!("{}={}", spec.name, urlencoding::encode(&plain)));
    }

    pairs.join("&")
}
