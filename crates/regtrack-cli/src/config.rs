//! Runtime configuration: flags with environment-variable fallbacks.

use std::path::PathBuf;

use clap::Args;
use regtrack_ai::{EmbeddingProvider, LexicalEmbedder};
use regtrack_notify::{LogNotifier, Notifier};
use regtrack_store::DataDir;

#[derive(Debug, Args)]
pub struct Config {
    /// Root of the data directory (regulations.json, contracts/, history/).
    #[arg(long, env = "REGTRACK_DATA_DIR", default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// POST notifications to this URL instead of logging them.
    #[arg(long, env = "REGTRACK_WEBHOOK_URL", global = true)]
    pub webhook_url: Option<String>,

    /// ONNX sentence-embedding model directory (model.onnx + tokenizer.json).
    #[arg(long, env = "REGTRACK_MODEL_DIR", global = true)]
    pub model_dir: Option<PathBuf>,
}

impl Config {
    pub fn data(&self) -> DataDir {
        DataDir::new(&self.data_dir)
    }

    pub fn notifier(&self) -> Box<dyn Notifier> {
        match &self.webhook_url {
            #[cfg(feature = "http")]
            Some(url) => {
                tracing::info!(url = %url, "notifications go to webhook");
                Box::new(regtrack_notify::WebhookNotifier::new(url.clone()))
            }
            #[cfg(not(feature = "http"))]
            Some(_) => {
                tracing::warn!("--webhook-url ignored: built without the `http` feature");
                Box::new(LogNotifier)
            }
            None => Box::new(LogNotifier),
        }
    }

    /// The provider used for semantic placement.
    ///
    /// The ONNX model is loaded on first use only, so runs where every
    /// clause is placed by keyword never pay for it.
    pub fn embedding_provider(&self) -> Box<dyn EmbeddingProvider> {
        match &self.model_dir {
            #[cfg(feature = "onnx")]
            Some(dir) => {
                use regtrack_ai::{Embedder, LazyProvider, Pooling};
                let dir = dir.clone();
                Box::new(LazyProvider::new(move || Embedder::load(&dir, Pooling::Cls)))
            }
            #[cfg(not(feature = "onnx"))]
            Some(dir) => {
                tracing::warn!(
                    model_dir = %dir.display(),
                    "--model-dir ignored: built without the `onnx` feature, using lexical embeddings"
                );
                Box::new(LexicalEmbedder::default())
            }
            None => Box::new(LexicalEmbedder::default()),
        }
    }
}
