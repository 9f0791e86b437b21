use chrono::{DateTime, Utc};

use crate::app::actions::{DisplayId, SideEffect};
use crate::display::{RelativeTimeDisplay, TimeNode};
use crate::util::config::{ExampleConfig, UiConfig};
use crate::util::datetime_input::format_datetime_local;
use crate::util::instant::Instant;

pub const SELECTOR_DISPLAY: DisplayId = DisplayId(0);

#[derive(Debug, Clone)]
pub struct TimeSelector {
    pub selected: Instant,
    pub input: String,
    pub editing: bool,
    pub input_error: Option<String>,
}

impl TimeSelector {
    pub fn new(selected: Instant) -> Self {
        Self {
            selected,
            input: format_datetime_local(&selected),
            editing: false,
            input_error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExampleRow {
    pub label: String,
    pub display: RelativeTimeDisplay,
}

#[derive(Debug)]
pub struct AppState {
    pub selector: TimeSelector,
    pub selector_display: RelativeTimeDisplay,
    pub examples: Vec<ExampleRow>,
    pub cursor: usize,

    // Displays whose visible text changed in the most recent update
    pub changed: Vec<DisplayId>,

    pub show_iso: bool,
    pub show_update_counts: bool,
    pub dirty: bool,
    pub should_quit: bool,
}

impl AppState {
    /// Build the demo the way a server render would: every example is
    /// rendered once against `now`, then hydrated with that text.
    pub fn new(
        selected: Instant,
        examples: &[ExampleConfig],
        ui: &UiConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let server_now = Instant::from_datetime(now);

        let examples = examples
            .iter()
            .filter_map(|example| {
                let instant = server_now.checked_add_secs(-example.offset_secs)?;
                let node = TimeNode::render(&instant, now);
                Some(ExampleRow {
                    label: example.label.clone(),
                    display: RelativeTimeDisplay::hydrated(instant, node.text),
                })
            })
            .collect();

        let selector_node = TimeNode::render(&selected, now);

        Self {
            selector: TimeSelector::new(selected),
            selector_display: RelativeTimeDisplay::hydrated(selected, selector_node.text),
            examples,
            cursor: 0,
            changed: Vec::new(),
            show_iso: ui.show_iso,
            show_update_counts: ui.show_update_counts,
            dirty: true,
            should_quit: false,
        }
    }

    pub fn display_ids(&self) -> Vec<DisplayId> {
        std::iter::once(SELECTOR_DISPLAY)
            .chain((0..self.examples.len()).map(|i| DisplayId(i + 1)))
            .collect()
    }

    pub fn display(&self, id: DisplayId) -> Option<&RelativeTimeDisplay> {
        if id == SELECTOR_DISPLAY {
            return Some(&self.selector_display);
        }
        self.examples.get(id.0 - 1).map(|row| &row.display)
    }

    pub fn display_mut(&mut self, id: DisplayId) -> Option<&mut RelativeTimeDisplay> {
        if id == SELECTOR_DISPLAY {
            return Some(&mut self.selector_display);
        }
        self.examples.get_mut(id.0 - 1).map(|row| &mut row.display)
    }

    pub fn selected_example(&self) -> Option<&ExampleRow> {
        self.examples.get(self.cursor)
    }

    pub fn selected_example_id(&self) -> DisplayId {
        DisplayId(self.cursor + 1)
    }

    pub fn activate_all(&mut self, now: DateTime<Utc>) -> Vec<SideEffect> {
        self.for_each_display(|display| display.activate(now))
    }

    pub fn tear_down_all(&mut self) -> Vec<SideEffect> {
        self.for_each_display(|display| display.tear_down())
    }

    fn for_each_display(
        &mut self,
        mut f: impl FnMut(&mut RelativeTimeDisplay) -> Vec<crate::display::TimerCommand>,
    ) -> Vec<SideEffect> {
        let mut effects = Vec::new();
        for id in self.display_ids() {
            if let Some(display) = self.display_mut(id) {
                effects.extend(SideEffect::from_commands(id, f(display)));
            }
        }
        effects
    }
}
