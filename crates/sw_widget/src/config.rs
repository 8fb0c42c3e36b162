use sw_client::ClientConfig;
use sw_render::RenderConfig;

/// Fixed text shown by the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetLabels {
    pub open: String,
    pub close: String,
    pub title: String,
    pub prompt: String,
    pub placeholder: String,
    pub summary_toggle: String,
    pub submit: String,
    pub submit_hint: String,
}

impl Default for WidgetLabels {
    fn default() -> Self {
        Self {
            open: "Open article search assistant".to_string(),
            close: "Close article search assistant".to_string(),
            title: "Article Search Assistant".to_string(),
            prompt: "Ask a public health question to find relevant article(s)".to_string(),
            placeholder: "Type your question here...".to_string(),
            summary_toggle: "Include a computer-generated summary".to_string(),
            submit: "Search".to_string(),
            submit_hint: "Search for relevant articles".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub client: ClientConfig,
    pub render: RenderConfig,
    pub labels: WidgetLabels,
    /// Whether the summary toggle is part of the modal at all.
    pub offer_summary: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            render: RenderConfig::default(),
            labels: WidgetLabels::default(),
            offer_summary: true,
        }
    }
}
