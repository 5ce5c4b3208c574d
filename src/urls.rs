use url::Url;

/// Convenience wrapper for URL generation functions.
#[derive(Clone)]
pub struct Urls {
    /// Top-level URL, including trailing slash.
    base: Url,

    /// Path for all homes-related actions.
    pub(crate) homes_path: String,

    /// Prefix for all homes-related actions.
    homes_prefix: String,
}

impl Urls {
    /// Create a new instance. `homes_prefix` should *not* include a trailing slash.
    pub fn new(base: impl AsRef<str>, homes_prefix: impl Into<String>) -> Self {
        let base =
            Url::parse(base.as_ref()).unwrap_or_else(|_| panic!("parse {} as URL", base.as_ref()));
        let homes_path = homes_prefix.into();
        let homes_prefix = format!("{}/", homes_path);

        Urls {
            base,
            homes_path,
            homes_prefix,
        }
    }

    pub fn homes(&self) -> Url {
        self.base.join(&self.homes_prefix).expect("get homes URL")
    }

    pub fn home(&self, id: &str) -> Url {
        self.homes()
            .join(id)
            .unwrap_or_else(|_| panic!("get URL for home {}", id))
    }
}
