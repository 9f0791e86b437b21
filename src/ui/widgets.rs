use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::app::actions::DisplayId;
use crate::app::state::{AppState, SELECTOR_DISPLAY};
use crate::display::RelativeTimeDisplay;
use crate::ui::theme;

pub fn render_selector(f: &mut Frame, area: Rect, state: &AppState) {
    let selector = &state.selector;
    let border_style = if selector.editing {
        theme::BORDER_FOCUSED
    } else {
        theme::BORDER_UNFOCUSED
    };

    let block = Block::default()
        .title(" Interactive Demo ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let input = if selector.editing {
        Span::styled(format!("{}_", selector.input), theme::HIGHLIGHT)
    } else {
        Span::styled(selector.input.clone(), theme::INPUT)
    };

    let relative_style = if state.changed.contains(&SELECTOR_DISPLAY) {
        theme::FLASH
    } else {
        theme::RELATIVE
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Select a date:     ", theme::LABEL),
            input,
        ]),
        Line::from(vec![
            Span::styled("Selected time:     ", theme::LABEL),
            Span::raw(selector.selected.to_locale_string()),
        ]),
        Line::from(vec![
            Span::styled("Relative display:  ", theme::LABEL),
            Span::styled(state.selector_display.text().to_string(), relative_style),
        ]),
    ];

    if let Some(ref err) = selector.input_error {
        lines.push(Line::from(Span::styled(err.as_str(), theme::ERROR)));
    } else if state.show_iso {
        let node = state.selector_display.node();
        lines.push(Line::from(Span::styled(
            format!("datetime={}", node.datetime),
            theme::DIM,
        )));
    }

    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, area);
}

pub fn render_examples(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!(" Examples ({}) ", state.examples.len()))
        .borders(Borders::ALL)
        .border_style(theme::BORDER_UNFOCUSED);

    if state.examples.is_empty() {
        let para = Paragraph::new("No examples configured")
            .style(theme::DIM)
            .block(block);
        f.render_widget(para, area);
        return;
    }

    let mut header = vec![
        Cell::from("Example").style(theme::HEADER),
        Cell::from("Relative").style(theme::HEADER),
    ];
    let mut widths = vec![Constraint::Length(18), Constraint::Length(18)];
    if state.show_iso {
        header.push(Cell::from("datetime").style(theme::HEADER));
        widths.push(Constraint::Length(26));
    }
    if state.show_update_counts {
        header.push(Cell::from("Updates").style(theme::HEADER));
        widths.push(Constraint::Length(8));
    }

    let rows: Vec<Row> = state
        .examples
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let id = DisplayId(i + 1);
            let style = if i == state.cursor {
                theme::HIGHLIGHT
            } else {
                Style::default()
            };
            let relative_style = if state.changed.contains(&id) {
                theme::FLASH
            } else if style == theme::HIGHLIGHT {
                style
            } else {
                theme::RELATIVE
            };

            let node = row.display.node();
            let mut cells = vec![
                Cell::from(row.label.as_str()).style(style),
                Cell::from(node.text).style(relative_style),
            ];
            if state.show_iso {
                cells.push(Cell::from(node.datetime).style(if style == theme::HIGHLIGHT {
                    style
                } else {
                    theme::DIM
                }));
            }
            if state.show_update_counts {
                cells.push(Cell::from(row.display.update_count().to_string()).style(style));
            }
            Row::new(cells).height(1)
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(Row::new(header).height(1))
        .block(block)
        .row_highlight_style(theme::HIGHLIGHT);

    f.render_widget(table, area);
}

pub fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let key_hints = if state.selector.editing {
        "Enter: apply | Esc: cancel"
    } else {
        "j/k: select | e: edit | +/-: minute | </>: hour | n: now | q: quit"
    };

    let detail = state
        .selected_example()
        .map(|row| describe(&row.display))
        .unwrap_or_default();

    let total_width = area.width as usize;
    let padding = total_width.saturating_sub(key_hints.len() + detail.len());

    let line = Line::from(vec![
        Span::styled(key_hints, theme::STATUS_BAR),
        Span::styled(" ".repeat(padding), theme::STATUS_BAR),
        Span::styled(detail, theme::STATUS_BAR),
    ]);

    let bar = Paragraph::new(line).style(theme::STATUS_BAR);
    f.render_widget(bar, area);
}

/// Hover label of a display plus when it next refreshes.
fn describe(display: &RelativeTimeDisplay) -> String {
    let title = display.node().title;
    match display.next_wake() {
        Some(wake) => format!(
            "{} | next {}",
            title,
            wake.with_timezone(&Local).format("%H:%M:%S")
        ),
        None => title,
    }
}
