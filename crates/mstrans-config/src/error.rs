use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Fatal startup condition; the Display text is the instruction shown to
    /// the user, so keep its wording stable.
    #[error(
        "no credentials file found at `{path}`.\n\
         copy `translator.env.sample` to `translator.env`.\n\
         replace the values in the file as appropriate."
    )]
    MissingCredentialsFile { path: String },

    #[error("credentials file `{path}` could not be read: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: dotenvy::Error,
    },

    #[error("credentials file `{path}` is missing the `{key}` entry")]
    MissingKey { path: String, key: &'static str },

    #[error("credentials file `{path}` has an empty `{key}` entry")]
    EmptyKey { path: String, key: &'static str },
}
