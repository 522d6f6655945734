// Static catalogs: canonical log messages for a run and the sample video carousel.
// See DESIGN.md: catalog.rs

const LOG_MESSAGES: [&str; 6] = [
    "Initializing Hailuo 2.3 Turbo engine...",
    "Analyzing prompt semantics...",
    "Synthesizing motion vectors...",
    "Applying neural upscaling...",
    "Optimizing 4K video buffer...",
    "Finalizing render...",
];

const SAMPLE_URLS: [&str; 3] = [
    "https://cdn.pixabay.com/video/2024/05/26/213757_tiny.mp4",
    "https://cdn.pixabay.com/video/2023/11/03/187654_tiny.mp4",
    "https://cdn.pixabay.com/video/2021/09/07/87742_tiny.mp4",
];

pub(crate) fn default_log_messages() -> Vec<String> {
    LOG_MESSAGES.iter().map(|m| m.to_string()).collect()
}

pub(crate) fn default_sample_urls() -> Vec<String> {
    SAMPLE_URLS.iter().map(|u| u.to_string()).collect()
}

/// Fixed, ordered list of log messages surfaced during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCatalog {
    messages: Vec<String>,
}

impl LogCatalog {
    pub fn new(messages: Vec<String>) -> Self {
        LogCatalog { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.messages.get(index).map(String::as_str)
    }

    /// Catalog index for a progress percentage: `floor(progress * N / 100)`.
    /// Integer division is the exact floor, free of float rounding at the thresholds.
    pub fn index_for(&self, progress: u8) -> usize {
        progress as usize * self.messages.len() / 100
    }

    /// First catalog position holding `message`.
    pub fn position(&self, message: &str) -> Option<usize> {
        self.messages.iter().position(|m| m == message)
    }
}

impl Default for LogCatalog {
    fn default() -> Self {
        LogCatalog::new(default_log_messages())
    }
}

/// Sample videos shown while idle, cycled with wraparound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleCarousel {
    urls: Vec<String>,
    current: usize,
}

impl SampleCarousel {
    /// `urls` must be non-empty; `WidgetConfig::validate` guarantees it for configured widgets.
    pub fn new(urls: Vec<String>) -> Self {
        SampleCarousel { urls, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn current_url(&self) -> Option<&str> {
        self.urls.get(self.current).map(String::as_str)
    }

    /// The result view always plays the first sample.
    pub fn first_url(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }

    pub fn next(&mut self) -> usize {
        if !self.urls.is_empty() {
            self.current = (self.current + 1) % self.urls.len();
        }
        self.current
    }

    pub fn prev(&mut self) -> usize {
        let n = self.urls.len();
        if n > 0 {
            self.current = (self.current + n - 1) % n;
        }
        self.current
    }
}

impl Default for SampleCarousel {
    fn default() -> Self {
        SampleCarousel::new(default_sample_urls())
    }
}
