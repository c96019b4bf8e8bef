//! Local Query Embeddings
//!
//! Uses fastembed for local ONNX inference — no external API calls.
//! Model: nomic-embed-text-v1.5 (768d → 256d Matryoshka, 8192 token context).

use std::sync::{Mutex, OnceLock};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use super::provider::{matryoshka_truncate, EmbeddingError, EmbeddingProvider, EMBEDDING_DIMENSIONS};

/// Maximum text length for embedding (truncated if longer)
pub const MAX_TEXT_LENGTH: usize = 8192;

// ============================================================================
// GLOBAL MODEL
// ============================================================================

static EMBEDDING_MODEL_RESULT: OnceLock<Result<Mutex<TextEmbedding>, String>> = OnceLock::new();

/// Cache directory for fastembed model files.
/// `STATSEEK_CACHE_PATH` overrides the platform cache directory.
fn get_cache_dir() -> std::path::PathBuf {
    if let Ok(path) = std::env::var("STATSEEK_CACHE_PATH") {
        return std::path::PathBuf::from(path);
    }

    if let Some(proj_dirs) = directories::ProjectDirs::from("com", "statseek", "core") {
        return proj_dirs.cache_dir().join("fastembed");
    }

    if let Some(base_dirs) = directories::BaseDirs::new() {
        return base_dirs.home_dir().join(".cache/statseek/fastembed");
    }

    std::path::PathBuf::from(".fastembed_cache")
}

/// Initialize the global embedding model on first use
fn get_model() -> Result<std::sync::MutexGuard<'static, TextEmbedding>, EmbeddingError> {
    let result = EMBEDDING_MODEL_RESULT.get_or_init(|| {
        let cache_dir = get_cache_dir();

        if let Err(e) = std::fs::create_dir_all(&cache_dir) {
            tracing::warn!("Failed to create cache directory {:?}: {}", cache_dir, e);
        }

        let options = InitOptions::new(EmbeddingModel::NomicEmbedTextV15)
            .with_show_download_progress(true)
            .with_cache_dir(cache_dir);

        TextEmbedding::try_new(options).map(Mutex::new).map_err(|e| {
            format!(
                "Failed to initialize nomic-embed-text-v1.5 embedding model: {}. \
                Ensure ONNX runtime is available and model files can be downloaded.",
                e
            )
        })
    });

    match result {
        Ok(model) => model
            .lock()
            .map_err(|e| EmbeddingError::ModelInit(format!("Lock poisoned: {}", e))),
        Err(err) => Err(EmbeddingError::ModelInit(err.clone())),
    }
}

// ============================================================================
// LOCAL EMBEDDER
// ============================================================================

/// Embedding provider backed by a local fastembed model.
///
/// Construction is cheap; the model is loaded lazily on the first `embed`
/// call (or eagerly via [`LocalEmbedder::init`]). Call `init` during startup,
/// not in hot paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEmbedder;

impl LocalEmbedder {
    /// Create a new local embedder
    pub fn new() -> Self {
        Self
    }

    /// Load the model now (downloads on first run)
    pub fn init(&self) -> Result<(), EmbeddingError> {
        let _model = get_model()?;
        Ok(())
    }

    /// Whether the model is ready without forcing initialization errors to panic
    pub fn is_ready(&self) -> bool {
        match get_model() {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Embedding model not ready: {}", e);
                false
            }
        }
    }

    /// Model identifier
    pub fn model_name(&self) -> &'static str {
        "nomic-ai/nomic-embed-text-v1.5"
    }
}

impl EmbeddingProvider for LocalEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "Text cannot be empty".to_string(),
            ));
        }

        let mut model = get_model()?;

        let text = if text.len() > MAX_TEXT_LENGTH {
            // Truncate on a char boundary
            let mut end = MAX_TEXT_LENGTH;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            &text[..end]
        } else {
            text
        };

        let embeddings = model
            .embed(vec![text], None)
            .map_err(|e| EmbeddingError::EmbeddingFailed(e.to_string()))?;

        let Some(embedding) = embeddings.into_iter().next() else {
            return Err(EmbeddingError::EmbeddingFailed(
                "No embedding generated".to_string(),
            ));
        };

        Ok(matryoshka_truncate(embedding))
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIMENSIONS
    }
}
