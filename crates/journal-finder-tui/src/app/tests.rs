use ratatui::layout::Rect;
use tokio::sync::mpsc;

use journal_finder_core::{FilterDefaults, Journal, LlmModel, SearchError, SearchPhase};

use super::*;
use crate::action::Action;
use crate::model::sidebar::SidebarItem;
use crate::tui_event::{BackendCommand, BackendEvent};

/// Create a minimal App for testing (no backend).
fn test_app() -> App {
    App::new(Theme::blue(), &FilterDefaults::default())
}

/// App wired to a command channel so submitted tickets can be inspected.
fn wired_app() -> (App, mpsc::UnboundedReceiver<BackendCommand>) {
    let mut app = test_app();
    let (tx, rx) = mpsc::unbounded_channel();
    app.backend_cmd_tx = Some(tx);
    (app, rx)
}

fn journal(id: u32, name: &str) -> Journal {
    Journal {
        id,
        name: name.to_string(),
        jif: 2.5,
        category: String::new(),
        keywords: vec![],
        publisher: "Elsevier".to_string(),
        decision_time: 21,
    }
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.update(Action::TextInput(ch));
    }
}

fn focus_sidebar_item(app: &mut App, item: &SidebarItem) {
    app.focus = Focus::Sidebar;
    let items = SidebarItem::all(&app.filters);
    app.sidebar.cursor = items.iter().position(|i| i == item).unwrap();
}

fn finish(app: &mut App, rx: &mut mpsc::UnboundedReceiver<BackendCommand>, journals: Vec<Journal>) {
    let BackendCommand::Search(ticket) = rx.try_recv().unwrap();
    app.handle_backend_event(BackendEvent::SearchFinished {
        seq: ticket.seq,
        outcome: Ok(journals),
    });
}

// ── Startup state ───────────────────────────────────────────────

#[test]
fn starts_idle_with_defaults() {
    let app = test_app();
    assert_eq!(*app.search.phase(), SearchPhase::Idle);
    assert_eq!(app.filters.impact_factor(), 0.0);
    assert_eq!(app.filters.decision_time(), 30);
    assert_eq!(app.filters.llm_model(), LlmModel::Faiss);
    assert!(app.results.is_empty());
    assert_eq!(app.input_mode, InputMode::Normal);
}

// ── Submitting a search ─────────────────────────────────────────

#[test]
fn submit_sends_ticket_with_committed_filters() {
    let (mut app, mut rx) = wired_app();
    app.abstract_input.set_text("Graph neural networks for catalysis");
    app.filters.add_publisher("Elsevier");
    app.filters.add_publisher("Springer");
    app.filters.set_publisher_search("Wil");

    app.update(Action::Submit);

    assert!(app.search.is_loading());
    let BackendCommand::Search(ticket) = rx.try_recv().unwrap();
    assert_eq!(ticket.seq, 1);
    assert_eq!(ticket.request.abstract_text, "Graph neural networks for catalysis");
    assert_eq!(ticket.request.criteria.publisher, "Elsevier, Springer");
    assert_eq!(ticket.request.criteria.first_decision_time, 30);
    // The search buffer is never committed on its own.
    assert_eq!(app.filters.publisher_search(), "Wil");
}

#[test]
fn empty_abstract_still_searches() {
    let (mut app, mut rx) = wired_app();
    app.update(Action::Submit);
    let BackendCommand::Search(ticket) = rx.try_recv().unwrap();
    assert_eq!(ticket.request.abstract_text, "");
}

#[test]
fn submit_clears_previous_results_immediately() {
    let (mut app, mut rx) = wired_app();
    app.update(Action::Submit);
    finish(&mut app, &mut rx, vec![journal(1, "A"), journal(2, "B")]);
    assert_eq!(app.results.len(), 2);

    app.update(Action::Submit);
    assert!(app.results.is_empty());
    assert!(app.search.is_loading());
    assert_eq!(app.results_cursor(), None);
}

#[test]
fn ctrl_r_while_editing_leaves_text_mode_and_submits() {
    let (mut app, mut rx) = wired_app();
    app.update(Action::DrillIn);
    type_text(&mut app, "abc");
    app.update(Action::Submit);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(rx.try_recv().is_ok());
}

#[test]
fn find_journals_button_submits() {
    let (mut app, mut rx) = wired_app();
    focus_sidebar_item(&mut app, &SidebarItem::FindJournals);
    app.update(Action::DrillIn);
    assert!(rx.try_recv().is_ok());
}

// ── Backend events ──────────────────────────────────────────────

#[test]
fn results_are_shown_in_service_order() {
    let (mut app, mut rx) = wired_app();
    app.update(Action::Submit);
    finish(&mut app, &mut rx, vec![journal(3, "C"), journal(1, "A")]);

    let names: Vec<_> = app.results.journals().iter().map(|j| j.name.as_str()).collect();
    assert_eq!(names, ["C", "A"]);
    assert_eq!(*app.search.phase(), SearchPhase::Resolved { count: 2 });
    assert_eq!(app.results_cursor(), Some(0));
}

#[test]
fn stale_response_is_discarded() {
    let (mut app, mut rx) = wired_app();
    app.update(Action::Submit);
    let BackendCommand::Search(first) = rx.try_recv().unwrap();
    app.update(Action::Submit);
    let BackendCommand::Search(second) = rx.try_recv().unwrap();

    app.handle_backend_event(BackendEvent::SearchFinished {
        seq: second.seq,
        outcome: Ok(vec![journal(1, "Newest")]),
    });
    app.handle_backend_event(BackendEvent::SearchFinished {
        seq: first.seq,
        outcome: Ok(vec![journal(9, "Stale")]),
    });

    assert_eq!(app.results.len(), 1);
    assert_eq!(app.results.journals()[0].name, "Newest");
}

#[test]
fn failed_search_shows_empty_list() {
    let (mut app, mut rx) = wired_app();
    app.update(Action::Submit);
    let BackendCommand::Search(ticket) = rx.try_recv().unwrap();
    app.handle_backend_event(BackendEvent::SearchFinished {
        seq: ticket.seq,
        outcome: Err(SearchError::Status {
            status: 500,
            reason: "Internal Server Error".into(),
        }),
    });
    assert!(app.results.is_empty());
    assert!(!app.search.is_loading());
    assert!(matches!(app.search.phase(), SearchPhase::Failed(_)));
}

// ── Detail modal ────────────────────────────────────────────────

fn app_with_open_detail() -> App {
    let (mut app, mut rx) = wired_app();
    app.update(Action::Submit);
    finish(&mut app, &mut rx, vec![journal(1, "A"), journal(2, "B")]);
    app.focus = Focus::Results;
    app.update(Action::MoveDown);
    app.update(Action::DrillIn);
    app
}

#[test]
fn drill_in_on_result_opens_detail() {
    let app = app_with_open_detail();
    assert_eq!(app.results.active().map(|j| j.name.as_str()), Some("B"));
}

#[test]
fn modal_blocks_other_input() {
    let mut app = app_with_open_detail();
    app.update(Action::MoveUp);
    app.update(Action::CycleFocus);
    app.update(Action::Submit);
    assert_eq!(app.results_cursor(), Some(1));
    assert_eq!(app.focus, Focus::Results);
    assert!(!app.search.is_loading());
    assert!(app.results.active().is_some());
}

#[test]
fn esc_closes_detail() {
    let mut app = app_with_open_detail();
    app.update(Action::NavigateBack);
    assert!(app.results.active().is_none());
}

#[test]
fn close_key_closes_detail() {
    let mut app = app_with_open_detail();
    app.update(Action::Remove);
    assert!(app.results.active().is_none());
}

#[test]
fn click_outside_closes_detail_but_inside_does_not() {
    let mut app = app_with_open_detail();
    app.last_detail_area = Some(Rect::new(10, 5, 40, 12));

    app.update(Action::ClickAt(20, 8));
    assert!(app.results.active().is_some());

    app.update(Action::ClickAt(2, 2));
    assert!(app.results.active().is_none());
}

#[test]
fn clicking_a_card_opens_it() {
    let (mut app, mut rx) = wired_app();
    app.update(Action::Submit);
    finish(&mut app, &mut rx, vec![journal(1, "A"), journal(2, "B")]);
    app.last_results_area = Some(Rect::new(0, 10, 60, 20));

    // Border row at y=10, first card rows 11..14, second 14..17.
    app.update(Action::ClickAt(5, 15));
    assert_eq!(app.results.active().map(|j| j.id), Some(2));
}

// ── Sidebar filters ─────────────────────────────────────────────

#[test]
fn impact_factor_steps_by_tenths_and_clamps() {
    let mut app = test_app();
    focus_sidebar_item(&mut app, &SidebarItem::ImpactFactor);
    app.update(Action::Increase);
    app.update(Action::Increase);
    assert!((app.filters.impact_factor() - 0.2).abs() < 1e-9);

    app.update(Action::Decrease);
    app.update(Action::Decrease);
    app.update(Action::Decrease);
    assert_eq!(app.filters.impact_factor(), 0.0);

    for _ in 0..60 {
        app.update(Action::IncreaseLarge);
    }
    assert_eq!(app.filters.impact_factor(), 50.0);
}

#[test]
fn decision_time_clamps_to_range() {
    let mut app = test_app();
    focus_sidebar_item(&mut app, &SidebarItem::DecisionTime);
    for _ in 0..10 {
        app.update(Action::DecreaseLarge);
    }
    assert_eq!(app.filters.decision_time(), 1);
    for _ in 0..10 {
        app.update(Action::IncreaseLarge);
    }
    assert_eq!(app.filters.decision_time(), 90);
}

#[test]
fn selecting_a_model_replaces_the_previous_one() {
    let mut app = test_app();
    focus_sidebar_item(&mut app, &SidebarItem::Model(LlmModel::Mixtral));
    app.update(Action::DrillIn);
    assert_eq!(app.filters.llm_model(), LlmModel::Mixtral);
    focus_sidebar_item(&mut app, &SidebarItem::Model(LlmModel::OpenAi));
    app.update(Action::DrillIn);
    assert_eq!(app.filters.llm_model(), LlmModel::OpenAi);
}

#[test]
fn publisher_search_suggests_and_adds() {
    let mut app = test_app();
    focus_sidebar_item(&mut app, &SidebarItem::PublisherSearch);
    app.update(Action::DrillIn);
    assert_eq!(app.editing, Some(EditTarget::PublisherSearch));

    type_text(&mut app, "spr");
    assert_eq!(app.filters.matching_publishers(), vec!["Springer Nature"]);
    app.update(Action::TextConfirm);

    assert_eq!(app.filters.publishers(), ["Springer Nature".to_string()]);
    assert_eq!(app.filters.publisher_search(), "");
    // Still editing, ready for the next publisher.
    assert_eq!(app.input_mode, InputMode::TextInput);
}

#[test]
fn leaving_publisher_search_keeps_buffer_uncommitted() {
    let mut app = test_app();
    focus_sidebar_item(&mut app, &SidebarItem::PublisherSearch);
    app.update(Action::DrillIn);
    type_text(&mut app, "Els");
    app.update(Action::TextCancel);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.filters.publishers().is_empty());
    assert_eq!(app.filters.publisher_search(), "Els");
}

#[test]
fn suggestion_cursor_picks_later_match() {
    let mut app = test_app();
    focus_sidebar_item(&mut app, &SidebarItem::PublisherSearch);
    app.update(Action::DrillIn);
    type_text(&mut app, "e");
    let suggestions = app.filters.matching_publishers();
    assert!(suggestions.len() >= 2);

    app.update(Action::MoveDown);
    app.update(Action::TextConfirm);
    assert_eq!(app.filters.publishers(), [suggestions[1].to_string()]);
}

#[test]
fn publisher_chip_is_removable() {
    let mut app = test_app();
    app.filters.add_publisher("IEEE");
    app.filters.add_publisher("Wiley");
    focus_sidebar_item(&mut app, &SidebarItem::Publisher("IEEE".into()));
    app.update(Action::Remove);
    assert_eq!(app.filters.publishers(), ["Wiley".to_string()]);
}

// ── Abstract editing ────────────────────────────────────────────

#[test]
fn abstract_accepts_text_and_newlines() {
    let mut app = test_app();
    app.update(Action::DrillIn);
    assert_eq!(app.editing, Some(EditTarget::Abstract));
    type_text(&mut app, "line one");
    app.update(Action::TextConfirm);
    type_text(&mut app, "two");
    app.update(Action::Backspace);
    app.update(Action::TextCancel);
    assert_eq!(app.abstract_input.text(), "line one\ntw");
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn paste_goes_to_edited_field() {
    let mut app = test_app();
    app.paste("ignored");
    assert_eq!(app.abstract_input.text(), "");

    app.update(Action::DrillIn);
    app.paste("first\r\nsecond");
    assert_eq!(app.abstract_input.text(), "first\nsecond");
}

// ── Quit / help ─────────────────────────────────────────────────

#[test]
fn quit_needs_confirmation() {
    let mut app = test_app();
    assert!(!app.update(Action::Quit));
    assert!(app.confirm_quit);
    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}

#[test]
fn esc_cancels_quit() {
    let mut app = test_app();
    app.update(Action::Quit);
    app.update(Action::NavigateBack);
    assert!(!app.confirm_quit);
    assert!(!app.should_quit);
}

#[test]
fn help_toggles() {
    let mut app = test_app();
    app.update(Action::ToggleHelp);
    assert!(app.show_help);
    app.update(Action::MoveDown);
    assert!(app.show_help);
    app.update(Action::ToggleHelp);
    assert!(!app.show_help);
}

#[test]
fn closing_sidebar_moves_focus_to_abstract() {
    let mut app = test_app();
    app.focus = Focus::Sidebar;
    app.update(Action::ToggleSidebar);
    assert!(!app.sidebar_open);
    assert_eq!(app.focus, Focus::Abstract);
    app.update(Action::CycleFocus);
    app.update(Action::CycleFocus);
    assert_eq!(app.focus, Focus::Abstract);
}
