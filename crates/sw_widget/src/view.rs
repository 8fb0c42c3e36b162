use askama::Template;
use sw_core::MAX_QUERY_CHARS;
use sw_render::{DisplayEntry, HtmlTarget, RenderTarget};

use crate::config::{WidgetConfig, WidgetLabels};

const ACTIVE_CLASS: &str = "chat-widget-active";

/// The floating button that opens the modal.
#[derive(Debug, Clone)]
pub struct Launcher {
    pub label: String,
    active: bool,
}

impl Launcher {
    /// The launcher is shown while the modal is hidden.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone)]
pub struct CloseControl {
    pub label: String,
}

/// Free-text question box. Text beyond the length bound is dropped, like a
/// `maxlength` attribute.
#[derive(Debug, Clone)]
pub struct QueryInput {
    pub placeholder: String,
    max_chars: usize,
    value: String,
}

impl QueryInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn set_value(&mut self, text: &str) {
        self.value = text.chars().take(self.max_chars).collect();
    }
}

#[derive(Debug, Clone)]
pub struct SummaryToggle {
    pub label: String,
    enabled: bool,
}

impl SummaryToggle {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[derive(Debug, Clone)]
pub struct SubmitControl {
    pub label: String,
    pub hint: String,
}

/// The area entries are rendered into.
///
/// Only the controller writes to it: the mutating methods are crate-private.
#[derive(Debug, Clone, Default)]
pub struct ResultContainer {
    entries: Vec<DisplayEntry>,
    generation: u64,
}

impl ResultContainer {
    pub fn entries(&self) -> &[DisplayEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Bumped every time the container is cleared.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.generation += 1;
    }

    pub(crate) fn append(&mut self, entries: Vec<DisplayEntry>) {
        self.entries.extend(entries);
    }
}

#[derive(Debug, Clone)]
pub struct Modal {
    pub title: String,
    pub prompt: String,
    pub close: CloseControl,
    pub input: QueryInput,
    pub summary_toggle: Option<SummaryToggle>,
    pub submit: SubmitControl,
    pub(crate) results: ResultContainer,
    visible: bool,
}

impl Modal {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn results(&self) -> &ResultContainer {
        &self.results
    }

    pub fn wants_summary(&self) -> bool {
        self.summary_toggle
            .as_ref()
            .map(SummaryToggle::is_enabled)
            .unwrap_or(false)
    }
}

/// Typed handles to every part of a mounted widget, built once.
#[derive(Debug, Clone)]
pub struct ViewTree {
    pub launcher: Launcher,
    pub modal: Modal,
    mounted: bool,
}

/// Builds the widget's view tree. The modal starts hidden.
pub fn mount(config: &WidgetConfig) -> ViewTree {
    let WidgetLabels {
        open,
        close,
        title,
        prompt,
        placeholder,
        summary_toggle,
        submit,
        submit_hint,
    } = config.labels.clone();

    tracing::debug!(offer_summary = config.offer_summary, "Mounting search widget");

    ViewTree {
        launcher: Launcher {
            label: open,
            active: true,
        },
        modal: Modal {
            title,
            prompt,
            close: CloseControl { label: close },
            input: QueryInput {
                placeholder,
                max_chars: MAX_QUERY_CHARS,
                value: String::new(),
            },
            summary_toggle: config.offer_summary.then(|| SummaryToggle {
                label: summary_toggle,
                enabled: false,
            }),
            submit: SubmitControl {
                label: submit,
                hint: submit_hint,
            },
            results: ResultContainer::default(),
            visible: false,
        },
        mounted: true,
    }
}

impl ViewTree {
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_open(&self) -> bool {
        self.modal.visible
    }

    pub fn results(&self) -> &ResultContainer {
        &self.modal.results
    }

    /// Flips launcher and modal together.
    pub(crate) fn toggle(&mut self) {
        self.modal.visible = !self.modal.visible;
        self.launcher.active = !self.launcher.active;
    }

    pub(crate) fn results_mut(&mut self) -> &mut ResultContainer {
        &mut self.modal.results
    }

    /// Hides everything, drops rendered entries and detaches the tree.
    pub(crate) fn teardown(&mut self) {
        self.modal.results.clear();
        self.modal.visible = false;
        self.launcher.active = false;
        self.mounted = false;
        tracing::debug!("Search widget torn down");
    }

    /// Host-page markup for the whole widget, current results included.
    pub fn to_html(&self, target: &HtmlTarget) -> String {
        if !self.mounted {
            return String::new();
        }

        let shell = ShellTemplate {
            launcher_class: class_list("chat-widget-button", self.launcher.active),
            modal_class: class_list("chat-widget-modal", self.modal.visible),
            launcher: &self.launcher,
            modal: &self.modal,
            results: target.render_entries(self.modal.results.entries()),
        };
        shell.render().unwrap_or_else(|err| {
            tracing::error!(error = %err, "Failed to render widget shell");
            String::new()
        })
    }
}

#[derive(Template)]
#[template(
    source = r#"<div class="chat-widget-wrapper">
  <div class="{{ launcher_class }}">
    <button type="button" aria-label="{{ launcher.label }}" title="{{ launcher.label }}">{{ launcher.label }}</button>
  </div>
  <div class="{{ modal_class }}">
    <div class="chat-widget-modal-title"><h3>{{ modal.title }}</h3></div>
    <button type="button" class="chat-widget-exit" aria-label="{{ modal.close.label }}" title="{{ modal.close.label }}">X</button>
    <div class="chat-widget-modal-body">
      <p>{{ modal.prompt }}</p>
      <textarea class="chat-widget-input" placeholder="{{ modal.input.placeholder }}" maxlength="{{ modal.input.max_chars() }}">{{ modal.input.value() }}</textarea>
      {% if let Some(toggle) = modal.summary_toggle %}
      <label class="chat-widget-summary-toggle"><input type="checkbox"{% if toggle.is_enabled() %} checked{% endif %}> {{ toggle.label }}</label>
      {% endif %}
      <button type="button" class="chat-widget-submit" aria-label="{{ modal.submit.hint }}" title="{{ modal.submit.hint }}">{{ modal.submit.label }}</button>
      <div class="chat-widget-br"></div>
      {% for fragment in results %}
      {{ fragment|safe }}
      {% endfor %}
    </div>
  </div>
</div>"#,
    ext = "html"
)]
struct ShellTemplate<'a> {
    launcher_class: String,
    modal_class: String,
    launcher: &'a Launcher,
    modal: &'a Modal,
    results: Vec<String>,
}

fn class_list(base: &str, active: bool) -> String {
    if active {
        format!("{} {}", base, ACTIVE_CLASS)
    } else {
        base.to_string()
    }
}
