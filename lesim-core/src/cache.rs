use std::collections::HashMap;

/// A script as shown in the editor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiScript {
    pub id: String,
    pub name: String,
    pub code: String,
}

/// Scripts already fetched or saved in this page, keyed by id, so switching
/// between them does not hit the server again.
///
/// Fetching is asynchronous in the page, so lookup and fill are separate
/// steps: `cached` on selection, `update` once the server answered.
#[derive(Clone, Debug, Default)]
pub struct ScriptCache {
    scripts: HashMap<String, UiScript>,
}

impl ScriptCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest name and code of a script, e.g. after saving it.
    pub fn update(&mut self, id: &str, name: &str, code: &str) {
        let entry = self
            .scripts
            .entry(id.to_string())
            .or_insert_with(|| UiScript {
                id: id.to_string(),
                ..UiScript::default()
            });
        entry.name = name.to_string();
        entry.code = code.to_string();
    }

    pub fn cached(&self, id: &str) -> Option<&UiScript> {
        self.scripts.get(id)
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}
