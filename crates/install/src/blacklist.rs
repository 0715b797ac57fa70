//! Names keg refuses to install without `--force`

use keg_config::BlacklistConfig;
use std::collections::BTreeMap;

/// Lookup of deliberately unpackaged names
pub trait Blacklist: Send + Sync {
    /// Advisory explaining why `name` is not packaged, if it is blacklisted
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Built-in table extended by `[blacklist.extra]` from the config file
#[derive(Debug, Clone, Default)]
pub struct BuiltinBlacklist {
    extra: BTreeMap<String, String>,
}

impl BuiltinBlacklist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &BlacklistConfig) -> Self {
        Self {
            extra: config
                .extra
                .iter()
                .map(|(name, advisory)| (name.to_lowercase(), advisory.clone()))
                .collect(),
        }
    }

    fn builtin(name: &str) -> Option<String> {
        let advisory = match name {
            "screen" | "rubygems" | "rubygem" => {
                format!("{name} ships with the operating system, look in /usr/bin.")
            }
            "libpcap" | "libiconv" => {
                format!("{name} ships with the operating system, look in /usr/lib.")
            }
            "tex" | "tex-live" | "texlive" | "latex" => "Building TeX from source needs a \
                 large patch set. Install a binary distribution such as MacTeX instead:\n  \
                 https://www.tug.org/mactex/"
                .to_string(),
            "pip" => "pip is installed together with Python:\n  keg install python".to_string(),
            "npm" => "npm is installed together with Node:\n  keg install node".to_string(),
            "lzma" | "liblzma" => "lzma is now part of the xz formula.".to_string(),
            "xcode" => "Xcode is distributed through the App Store or:\n  \
                 https://developer.apple.com/"
                .to_string(),
            "sshpass" => "sshpass makes it too easy to undermine SSH's security, so it is \
                 not packaged."
                .to_string(),
            _ => return None,
        };
        Some(advisory)
    }
}

impl Blacklist for BuiltinBlacklist {
    fn lookup(&self, name: &str) -> Option<String> {
        let name = name.to_lowercase();
        self.extra
            .get(&name)
            .cloned()
            .or_else(|| Self::builtin(&name))
    }
}
