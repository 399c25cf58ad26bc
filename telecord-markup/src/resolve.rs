//! Collaborator interfaces supplied by the hosting bot
//!
//! The library never talks to either chat platform. Anything that needs a live lookup
//! (display names, public file URLs) comes in through these traits, so tests can pass
//! canned implementations.

use std::collections::HashMap;

/// Looks up display names for Discord ids.
///
/// Returning `None` makes the renderer fall back to the literal id.
pub trait NameResolver {
    fn user(&self, id: u64) -> Option<String>;
    fn channel(&self, id: u64) -> Option<String>;
    fn role(&self, id: u64) -> Option<String>;
}

/// Resolves nothing; every mention renders as its numeric id.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralNames;

impl NameResolver for LiteralNames {
    fn user(&self, _id: u64) -> Option<String> {
        None
    }

    fn channel(&self, _id: u64) -> Option<String> {
        None
    }

    fn role(&self, _id: u64) -> Option<String> {
        None
    }
}

/// In-memory name table, handy for tests and for callers that prefetch names.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    pub users: HashMap<u64, String>,
    pub channels: HashMap<u64, String>,
    pub roles: HashMap<u64, String>,
}

impl NameResolver for NameTable {
    fn user(&self, id: u64) -> Option<String> {
        self.users.get(&id).cloned()
    }

    fn channel(&self, id: u64) -> Option<String> {
        self.channels.get(&id).cloned()
    }

    fn role(&self, id: u64) -> Option<String> {
        self.roles.get(&id).cloned()
    }
}

/// Produces a public URL for a Telegram file handle.
pub trait FileUrlGenerator {
    fn file_url(
        &self,
        file_id: &str,
        extension: Option<&str>,
        mime_type: Option<&str>,
        file_name: Option<&str>,
    ) -> String;
}

/// `<base>/<file_id>[.<extension>]` with the mime type and file name as query
/// parameters. Signing and relaying are left to the host.
#[derive(Debug, Clone)]
pub struct BaseUrlFiles {
    base: String,
}

impl BaseUrlFiles {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        BaseUrlFiles {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl FileUrlGenerator for BaseUrlFiles {
    fn file_url(
        &self,
        file_id: &str,
        extension: Option<&str>,
        mime_type: Option<&str>,
        file_name: Option<&str>,
    ) -> String {
        let mut url = format!("{}/{}", self.base, file_id);
        if let Some(ext) = extension {
            url.push('.');
            url.push_str(ext);
        }
        let query: Vec<String> = [("mime_type", mime_type), ("file_name", file_name)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| format!("{key}={}", encode_component(v))))
            .collect();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        url
    }
}

fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
