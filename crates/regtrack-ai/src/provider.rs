use tracing::info;

/// Maps text to fixed-length vectors for similarity comparison.
///
/// Injected into the amendment engine by the caller. Implementations may be
/// expensive to construct; wrap them in [`LazyProvider`] to defer that cost
/// until semantic placement is actually needed.
pub trait EmbeddingProvider {
    /// Embed a batch of texts, returning one vector per input, in order.
    fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    fn embed(&mut self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.embed_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("provider returned no embedding"))
    }
}

impl<P: EmbeddingProvider + ?Sized> EmbeddingProvider for Box<P> {
    fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }
}

impl<P: EmbeddingProvider + ?Sized> EmbeddingProvider for &mut P {
    fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }
}

/// A provider built on first use and reused for the rest of its lifetime.
///
/// If initialisation fails the error is returned and the next call retries.
pub struct LazyProvider<P, F> {
    init: F,
    inner: Option<P>,
}

impl<P, F> LazyProvider<P, F>
where
    P: EmbeddingProvider,
    F: FnMut() -> anyhow::Result<P>,
{
    pub fn new(init: F) -> Self {
        Self { init, inner: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.is_some()
    }

    fn get(&mut self) -> anyhow::Result<&mut P> {
        if self.inner.is_none() {
            info!("initialising embedding provider");
            self.inner = Some((self.init)()?);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("embedding provider unavailable"))
    }
}

impl<P, F> EmbeddingProvider for LazyProvider<P, F>
where
    P: EmbeddingProvider,
    F: FnMut() -> anyhow::Result<P>,
{
    fn embed_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        self.get()?.embed_batch(texts)
    }
}

/// Cosine similarity of two vectors.
///
/// Zero-norm vectors (and vectors of differing length) score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut a_norm_sq = 0.0f32;
    let mut b_norm_sq = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        a_norm_sq += x * x;
        b_norm_sq += y * y;
    }
    if a_norm_sq == 0.0 || b_norm_sq == 0.0 {
        return 0.0;
    }
    dot / (a_norm_sq.sqrt() * b_norm_sq.sqrt())
}

/// Index and score of the candidate most similar to `query`.
///
/// Ties go to the lowest index. Returns `None` for an empty candidate list.
pub fn best_match(candidates: &[Vec<f32>], query: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        let sim = cosine_similarity(candidate, query);
        match best {
            Some((_, best_sim)) if sim <= best_sim => {}
            _ => best = Some((i, sim)),
        }
    }
    best
}

/// L2-normalize a vector in place.
pub(crate) fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
