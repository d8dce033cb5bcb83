//! Rendering helpers for widget tests

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};

use pivot_app::state::Collections;
use pivot_app::AppState;
use pivot_core::Stats;
use serde_json::{json, Map};

use pivot_api::test_utils::{
    test_asset, test_asset_with, test_batch_command, test_methodology, test_relationship,
};

/// Render a widget into a fresh buffer
pub fn render_widget(widget: impl Widget, width: u16, height: u16) -> Buffer {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buf
}

/// Render a full frame through a `TestBackend`
pub fn render_frame(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal.draw(draw).expect("draw");
    terminal.backend().buffer().clone()
}

/// Buffer contents as text, one line per row with trailing blanks trimmed
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    (area.y..area.y + area.height)
        .map(|y| {
            let row: String = (area.x..area.x + area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// State holding a small engagement: a segment, two hosts, commands and
/// methodologies
pub fn populated_state() -> AppState {
    let mut state = AppState::new();
    let mut host_props = Map::new();
    host_props.insert("ip".into(), json!("10.0.0.5"));
    host_props.insert("os".into(), json!("Linux"));

    state.data = Collections {
        stats: Stats {
            total_assets: 3,
            total_methodologies: 2,
            total_trigger_matches: 1,
            total_batch_commands: 2,
            pending_commands: 1,
            ..Default::default()
        },
        assets: vec![
            test_asset_with("a1", "host", "web-01", host_props),
            test_asset("a2", "host", "db-01"),
            test_asset("a3", "network_segment", "dmz-segment"),
        ],
        methodologies: vec![
            test_methodology("m1", "Nmap Sweep", "recon"),
            test_methodology("m2", "Kerberoast", "exploitation"),
        ],
        batch_commands: vec![
            test_batch_command("b1", "Nmap Sweep", "nmap -sV 10.0.0.0/24", true),
            test_batch_command("b2", "Kerberoast", "GetUserSPNs.py corp/user", false),
        ],
        relationships: vec![test_relationship("r1", "a1", "a2", "can_pivot_to")],
        ..Default::default()
    };
    state
}
