//! The knowledge base store module
//! Provide the durable list of question/answer pairs plus admin credentials,
//! persisted as a JSON document on disk

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

/// One stored question/answer record. Ids are unique and start at 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    pub id: u32,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Credentials {
    username: String,
    /// Format: `<salt>$<sha256(salt + password) hex>`
    password_hash: String,
}

/// On-disk document layout.
#[derive(Debug, Serialize, Deserialize)]
struct Document {
    qa_pairs: Vec<QaPair>,
    credentials: Option<Credentials>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed knowledge base document: {0}")]
    Malformed(serde_json::Error),
    #[error("failed to serialize knowledge base: {0}")]
    Serialize(serde_json::Error),
}

/// The knowledge base: an in-memory pair list backed by a JSON file.
///
/// All mutations go through [`add`](KnowledgeBase::add),
/// [`update`](KnowledgeBase::update) and [`delete`](KnowledgeBase::delete),
/// which persist before reporting success. Failures never escape as errors;
/// they are logged and surfaced as `false`.
pub struct KnowledgeBase {
    path: PathBuf,
    pairs: Vec<QaPair>,
    credentials: Option<Credentials>,
}

impl KnowledgeBase {
    /// Loads the knowledge base from `path`.
    ///
    /// A missing file seeds a fresh store with the default pairs and default
    /// `admin`/`admin` credentials and writes it out. A malformed file
    /// degrades to an empty store rather than failing the caller; the parse
    /// error is logged.
    pub fn load<P: AsRef<Path>>(path: P) -> KnowledgeBase {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            let mut kb = KnowledgeBase {
                path,
                pairs: default_pairs(),
                credentials: Some(Credentials {
                    username: "admin".to_string(),
                    password_hash: hash_password("admin"),
                }),
            };
            if let Err(e) = kb.save() {
                error!("failed to seed knowledge base file: {}", e);
            }
            return kb;
        }

        match read_document(&path) {
            Ok(doc) => KnowledgeBase { path, pairs: doc.qa_pairs, credentials: doc.credentials },
            Err(e) => {
                error!("failed to load knowledge base, starting empty: {}", e);
                KnowledgeBase { path, pairs: Vec::new(), credentials: None }
            }
        }
    }

    /// All stored pairs, in insertion order.
    pub fn all(&self) -> &[QaPair] {
        &self.pairs
    }

    /// Number of stored pairs.
    pub fn count(&self) -> usize {
        self.pairs.len()
    }

    /// Appends a new pair with `max(ids) + 1` and persists.
    ///
    /// Returns `false` if persisting failed; the in-memory record is kept
    /// either way so readers stay consistent, and disk catches up on the
    /// next successful save.
    pub fn add(&mut self, question: &str, answer: &str) -> bool {
        let new_id = self.pairs.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        self.pairs.push(QaPair {
            id: new_id,
            question: question.to_string(),
            answer: answer.to_string(),
        });

        match self.save() {
            Ok(()) => {
                info!(id = new_id, "added knowledge base pair");
                true
            }
            Err(e) => {
                error!("failed to persist after add: {}", e);
                false
            }
        }
    }

    /// Replaces the question and answer text of the pair with the given id
    /// in place. Unknown id returns `false`.
    pub fn update(&mut self, id: u32, question: &str, answer: &str) -> bool {
        let Some(pair) = self.pairs.iter_mut().find(|p| p.id == id) else {
            warn!(id, "update on unknown knowledge base id");
            return false;
        };
        pair.question = question.to_string();
        pair.answer = answer.to_string();

        match self.save() {
            Ok(()) => {
                info!(id, "updated knowledge base pair");
                true
            }
            Err(e) => {
                error!("failed to persist after update: {}", e);
                false
            }
        }
    }

    /// Removes the pair with the given id. Unknown id returns `false`.
    pub fn delete(&mut self, id: u32) -> bool {
        let Some(index) = self.pairs.iter().position(|p| p.id == id) else {
            warn!(id, "delete on unknown knowledge base id");
            return false;
        };
        self.pairs.remove(index);

        match self.save() {
            Ok(()) => {
                info!(id, "deleted knowledge base pair");
                true
            }
            Err(e) => {
                error!("failed to persist after delete: {}", e);
                false
            }
        }
    }

    /// Checks admin credentials. The username must match exactly and the
    /// password must match the stored salted hash. Missing stored
    /// credentials always fail.
    pub fn verify_credentials(&self, username: &str, password: &str) -> bool {
        let Some(creds) = &self.credentials else {
            return false;
        };
        creds.username == username && verify_password(password, &creds.password_hash)
    }

    /// Writes the current state to disk as pretty-printed JSON.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let doc = Document {
            qa_pairs: self.pairs.clone(),
            credentials: self.credentials.clone(),
        };
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &doc).map_err(StoreError::Serialize)?;
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<Document, StoreError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(StoreError::Malformed)
}

/// The records a brand-new store is seeded with.
fn default_pairs() -> Vec<QaPair> {
    vec![
        QaPair {
            id: 1,
            question: "Who is the principal of APS Mangla?".to_string(),
            answer: "Talat Wazir is the principal of APS Mangla".to_string(),
        },
        QaPair {
            id: 2,
            question: "What subjects are taught in ICS?".to_string(),
            answer: "ICS subjects include Physics, Maths, Computer, English, Urdu and \
                     Islamiyat for 1st year. For 2nd year, Pak Studies replaces Islamiyat"
                .to_string(),
        },
    ]
}

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt = format!("{:032x}", rand::random::<u128>());
    let digest = salted_digest(&salt, password);
    format!("{salt}${digest}")
}

/// Checks a password against a `<salt>$<digest>` hash.
fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, digest)) = stored.split_once('$') else {
        return false;
    };
    salted_digest(salt, password) == digest
}

fn salted_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
