// ABOUTME: Test UI display components including menu bar, help text and the notification overlay

use notification_center::app::App;
use notification_center::components::LayoutComponent;
use notification_center::config::AppConfig;
use notification_center::models::Severity;
use ratatui::{backend::TestBackend, Terminal};

fn render(app: &mut App) -> String {
    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    let mut layout = LayoutComponent::new();

    terminal.draw(|frame| {
        layout.render(frame, &mut app.state);
    }).unwrap();

    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}

#[test]
fn test_bottom_menu_bar_lists_notification_keys() {
    let mut app = App::new(AppConfig::default()).unwrap();
    let content = render(&mut app);

    assert!(content.contains("[i]nfo"), "Should contain '[i]nfo'");
    assert!(content.contains("[d]ismiss"), "Should contain '[d]ismiss'");
    assert!(content.contains("[?]help"), "Should contain '[?]help'");
    assert!(content.contains("[q]uit"), "Should contain '[q]uit'");
}

#[test]
fn test_notifications_overlay_appears_after_show() {
    let mut app = App::new(AppConfig::default()).unwrap();
    let content = render(&mut app);
    assert!(!content.contains("Notifications ("));

    app.state.show(Severity::Error, "Disk full");
    app.state.show(Severity::Info, "Saved");
    let content = render(&mut app);

    assert!(content.contains("Notifications (2)"));
    let saved = content.find("Saved").expect("newest notification rendered");
    let disk = content.find("Disk full").expect("older notification rendered");
    assert!(saved < disk, "Newest notification should be drawn above older ones");
}

#[test]
fn test_help_screen_lists_sections() {
    let mut app = App::new(AppConfig::default()).unwrap();
    app.state.help_visible = true;
    let content = render(&mut app);

    assert!(content.contains("Navigation:"), "Should contain 'Navigation:' section");
    assert!(content.contains("Notifications:"), "Should contain 'Notifications:' section");
    assert!(content.contains("General:"), "Should contain 'General:' section");
    assert!(content.contains("Enter      Expand/collapse"));
}

#[test]
fn test_workbench_reports_theme_and_source() {
    let mut app = App::new(AppConfig {
        source_label: "Editor Core".to_string(),
        theme: "light".to_string(),
        ..AppConfig::default()
    })
    .unwrap();
    app.state.show(Severity::Warning, "Low memory");
    let content = render(&mut app);

    assert!(content.contains("Editor Core"));
    assert!(content.contains("Theme: light"));
}
