use crate::command::{Command, CommandOutcome};
use crate::config::DesignerConfig;
use crate::panels::{
    DisplaySelectorState, central_panel, code_panel, display_selector, editor_panel,
};
use crate::state::EditorContext;

/// One open design: the editor session plus the text the panels edit.
#[derive(Debug)]
pub struct EditorSession {
    pub context: EditorContext,
    pub config: DesignerConfig,
    /// Editor script as typed by the user
    pub script: String,
    /// Code text box contents; replaced whenever the generated code changes
    pub code_buffer: String,
    last_generated: String,
    pub line_errors: Vec<String>,
    pub status: Option<String>,
}

impl EditorSession {
    pub fn new(config: DesignerConfig) -> Result<Self, crate::error::GrammarError> {
        let context = EditorContext::new(&config)?;
        let mut session = Self {
            context,
            script: config.initial_script.clone(),
            config,
            code_buffer: String::new(),
            last_generated: String::new(),
            line_errors: Vec::new(),
            status: None,
        };
        session.execute(Command::RunScript(session.script.clone()));
        Ok(session)
    }

    pub fn execute(&mut self, command: Command) {
        let name = command.name();
        match command.execute(&mut self.context) {
            Ok(CommandOutcome::Rebuilt {
                element_count,
                errors,
            }) => {
                self.line_errors = errors.iter().map(ToString::to_string).collect();
                self.last_generated.clear();
                self.status = Some(format!("{}: {} element(s)", name, element_count));
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("{} failed: {}", name, e);
                self.status = Some(e.to_string());
            }
        }
        self.sync_code_buffer();
    }

    /// Pull freshly generated code into the text box.
    pub fn sync_code_buffer(&mut self) {
        if self.context.code() != self.last_generated {
            self.last_generated = self.context.code().to_string();
            self.code_buffer = self.last_generated.clone();
        }
    }
}

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct DesignerApp {
    config: DesignerConfig,
    #[serde(skip)]
    selector: DisplaySelectorState,
    #[serde(skip)]
    session: Option<EditorSession>,
}

impl DesignerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        if let Some(config) = DesignerConfig::from_env() {
            app.config = config;
        }
        app.selector = DisplaySelectorState::from_config(&app.config);
        log::info!(
            "Starting with {} ({}x{})",
            app.config.display_name,
            app.config.width,
            app.config.height
        );
        app
    }

    fn open_editor(&mut self, config: DesignerConfig) {
        match EditorSession::new(config.clone()) {
            Ok(session) => {
                log::info!(
                    "Designing for {} ({}x{})",
                    config.display_name,
                    config.width,
                    config.height
                );
                self.config = config;
                self.session = Some(session);
            }
            Err(e) => {
                log::error!("Cannot open editor: {}", e);
                self.selector.error = Some(e.to_string());
            }
        }
    }
}

impl eframe::App for DesignerApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.is_none() {
            if let Some(config) = display_selector(&self.config, &mut self.selector, ctx) {
                self.open_editor(config);
            }
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let change_display = editor_panel(session, ctx);
        code_panel(session, ctx);
        central_panel(session, ctx);

        if change_display {
            self.selector = DisplaySelectorState::from_config(&self.config);
            self.session = None;
        }
    }
}
