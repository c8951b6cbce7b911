use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flashdeck::app::{App, AppScreen};
use flashdeck::config::Config;
use flashdeck::event::{AppEvent, EventHandler};
use flashdeck::keys;
use flashdeck::ui::components::category_controls;
use flashdeck::ui::components::category_menu::CategoryMenu;
use flashdeck::ui::components::learning_card::LearningCard;
use flashdeck::ui::components::manage_modal::ManagePanel;
use flashdeck::ui::components::notice::NoticeDialog;
use flashdeck::ui::components::term_grid::TermGrid;
use flashdeck::ui::layout::{AppLayout, centered_rect, pack_hint_lines};
use flashdeck::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "flashdeck", version, about = "Terminal flashcards for safety certification study")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Directory holding saved cards and the log file")]
    data_dir: Option<PathBuf>,

    #[arg(short, long, help = "Interface language (ko, en)")]
    locale: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir.to_string_lossy().to_string();
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    config.normalize();

    init_logging(&config.data_dir());
    rust_i18n::set_locale(&config.locale);
    if !Theme::available_themes().contains(&config.theme) {
        warn!(theme = %config.theme, "theme is not bundled, trying user themes");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "flashdeck starting");

    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    app.attach_decoder(events.sender());

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }
    info!("flashdeck stopped");

    Ok(())
}

/// Log to a file in the data directory; stdout belongs to the terminal UI.
fn init_logging(data_dir: &Path) {
    if fs::create_dir_all(data_dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("flashdeck.log"))
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("FLASHDECK_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => keys::handle_key(app, key),
            AppEvent::ImageDecoded(pending, result) => app.finish_add(*pending, result),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let hints = keys::hints(app);
    let hint_refs: Vec<&str> = hints.iter().map(String::as_str).collect();
    let footer_lines = pack_hint_lines(&hint_refs, area.width as usize);
    let layout = AppLayout::new(area, footer_lines.len() as u16);

    let title = match &app.current_category {
        Some(category) => format!(" flashdeck › {category} "),
        None => " flashdeck ".to_string(),
    };
    let header = Paragraph::new(Line::from(Span::styled(
        title,
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    match app.screen {
        AppScreen::Home => render_home(frame, app, layout.main),
        AppScreen::Category => render_category(frame, app, layout.main),
    }

    let footer = Paragraph::new(
        footer_lines
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.muted()))))
            .collect::<Vec<_>>(),
    );
    frame.render_widget(footer, layout.footer);

    if app.learning.is_open() {
        let view = app.learning_view();
        frame.render_widget(LearningCard::new(&view, app.theme), area);
    }
    if app.manage.open
        && let Some(category) = &app.current_category
    {
        let list = app.manage_view();
        let panel = ManagePanel::new(
            category.as_str(),
            &app.manage,
            &list,
            app.focus.as_ref(),
            app.theme,
        );
        frame.render_widget(panel, area);
    }
    if let Some(notice) = &app.notice {
        frame.render_widget(NoticeDialog::new(notice, app.theme), area);
    }
}

fn render_home(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let items = app.home_view();
    let menu_area = centered_rect(50, 80, area);
    frame.render_widget(CategoryMenu::new(&items, app.theme), menu_area);
}

fn render_category(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let Some(category) = &app.current_category else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let controls = category_controls(app.focus.as_ref(), colors);
    frame.render_widget(Paragraph::new(controls), rows[0]);

    let view = app.term_grid_view();
    frame.render_widget(TermGrid::new(category.as_str(), &view, app.theme), rows[1]);
}
