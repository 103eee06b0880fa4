use std::path::{Path, PathBuf};
use std::sync::Mutex;
use serde_json::{Map, Value};
use tracing::{debug, info};
use crate::errors::StoreError;
use crate::models::SiteContent;
use super::file_service::{read_json, write_json};

pub const CONTENT_FILE_NAME: &str = "siteContent.json";

const CONTENT_FIELDS: [&str; 3] = ["myJourney", "skills", "milestones"];

/// The single JSON document behind the About page.
///
/// Reads always hand back the three list fields; saves replace the whole
/// document with whatever was posted. There is no merge and no version
/// check, the last writer wins.
#[derive(Debug)]
pub struct ContentStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ContentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("data").join(CONTENT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document, creating it with empty lists when absent.
    pub fn read(&self) -> Result<Value, StoreError> {
        match read_json::<Value>(&self.path).map_err(StoreError::Read)? {
            Some(document) => Ok(coerce_document(&document)),
            None => {
                info!("Creating default site content at {}", self.path.display());
                let document = default_document();
                self.write(&document)?;
                Ok(document)
            }
        }
    }

    /// Overwrite the document with `body`. A missing body is refused, and so
    /// is one that only stands for "nothing": `null`, `false`, `0` or `""`.
    pub fn replace(&self, body: Option<Value>) -> Result<(), StoreError> {
        let body = match body {
            Some(body) if !is_empty_body(&body) => body,
            _ => return Err(StoreError::MissingBody),
        };
        self.write(&body)?;
        info!("Site content replaced");
        Ok(())
    }

    /// Typed view of [`ContentStore::read`].
    pub fn load(&self) -> Result<SiteContent, StoreError> {
        serde_json::from_value(self.read()?).map_err(StoreError::Shape)
    }

    pub fn save(&self, content: &SiteContent) -> Result<(), StoreError> {
        let body = serde_json::to_value(content).map_err(StoreError::Shape)?;
        self.replace(Some(body))
    }

    fn write(&self, document: &Value) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        write_json(&self.path, document).map_err(StoreError::Write)
    }
}

fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

pub fn default_document() -> Value {
    let mut document = Map::new();
    for field in CONTENT_FIELDS {
        document.insert(field.to_string(), Value::Array(Vec::new()));
    }
    Value::Object(document)
}

/// Keep the three list fields, substituting an empty list for anything else.
pub fn coerce_document(document: &Value) -> Value {
    let mut coerced = Map::new();
    for field in CONTENT_FIELDS {
        let value = match document.get(field) {
            Some(list @ Value::Array(_)) => list.clone(),
            other => {
                if other.is_some() {
                    debug!(field, "Stored field is not a list, serving an empty one");
                }
                Value::Array(Vec::new())
            }
        };
        coerced.insert(field.to_string(), value);
    }
    Value::Object(coerced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Skill;
    use serde_json::json;

    fn store_in(dir: &tempfile::TempDir) -> ContentStore {
        ContentStore::in_dir(dir.path())
    }

    #[test]
    fn read_of_missing_document_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let document = store.read().unwrap();

        assert_eq!(document, json!({ "myJourney": [], "skills": [], "milestones": [] }));
        assert!(store.path().exists());
        let on_disk: Value = read_json(store.path()).unwrap().unwrap();
        assert_eq!(on_disk, document);
    }

    #[test]
    fn posted_document_reads_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let body = json!({
            "myJourney": ["First stitches at eight.", "Then quilts."],
            "skills": [{ "name": "Embroidery", "level": 90, "years": 12 }],
            "milestones": [{ "year": "2019", "title": "First sale", "description": "Etsy shop opened" }]
        });

        store.replace(Some(body.clone())).unwrap();

        assert_eq!(store.read().unwrap(), body);
    }

    #[test]
    fn non_list_field_is_served_as_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .replace(Some(json!({
                "myJourney": ["kept"],
                "skills": "not a list",
                "milestones": []
            })))
            .unwrap();

        let document = store.read().unwrap();

        assert_eq!(document["skills"], json!([]));
        assert_eq!(document["myJourney"], json!(["kept"]));
    }

    #[test]
    fn non_object_document_coerces_every_field() {
        assert_eq!(coerce_document(&json!([1, 2, 3])), default_document());
    }

    #[test]
    fn absent_body_is_refused_and_document_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.replace(Some(json!({ "myJourney": ["a"] }))).unwrap();

        assert!(matches!(store.replace(None), Err(StoreError::MissingBody)));
        for empty in [Value::Null, json!(false), json!(0), json!(""), json!(0.0)] {
            assert!(matches!(store.replace(Some(empty)), Err(StoreError::MissingBody)));
        }
        assert_eq!(store.read().unwrap()["myJourney"], json!(["a"]));

        // a truthy scalar is stored and reads back as empty lists
        store.replace(Some(json!(true))).unwrap();
        assert_eq!(store.read().unwrap(), default_document());
    }

    #[test]
    fn unparseable_document_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{{{").unwrap();

        assert!(matches!(store.read(), Err(StoreError::Read(_))));
    }

    #[test]
    fn typed_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let content = SiteContent {
            my_journey: vec!["para".to_string()],
            skills: vec![Skill::placeholder()],
            milestones: Vec::new(),
        };

        store.save(&content).unwrap();

        assert_eq!(store.load().unwrap(), content);
    }
}
