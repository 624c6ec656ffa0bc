//! Main application UI.
//! Browsing the reference tables feeds the learner's progress, which in turn
//! decides the cards offered in a review session.

use eframe::egui;
use mythos_atlas::config::AtlasConfig;
use mythos_atlas::database::Database;
use mythos_atlas::database::repository::save_progress;
use mythos_atlas::export::json::{export_review_state_to_path, import_review_state};
use mythos_atlas::models::calendar::{Clock, format_iso_date};
use mythos_atlas::models::{DifficultyRating, Progress, ReviewEngine, ReviewSession};

type Engine = ReviewEngine<Database, Box<dyn Clock>>;

/// Application screen states
#[derive(Default)]
enum AppScreen {
    #[default]
    Main,
    Review,
}

/// Main application state
pub struct AtlasApp {
    show_confirmation_dialog: bool,
    allowed_to_close: bool,
    db: Database,
    engine: Engine,
    progress: Progress,
    progress_storage_key: String,
    simulated_clock: bool,

    current_screen: AppScreen,
    session: Option<ReviewSession>,

    show_result_dialog: bool,
    result_message: String,
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.current_screen {
            AppScreen::Main => self.render_main_screen(ctx),
            AppScreen::Review => self.render_review_screen(ctx),
        }

        if ctx.input(|i| i.viewport().close_requested()) && !self.allowed_to_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.show_confirmation_dialog = true;
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                        }
                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }

        if self.show_result_dialog {
            egui::Window::new("Import/Export Result")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&self.result_message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.show_result_dialog = false;
                    }
                });
        }
    }
}

impl AtlasApp {
    pub fn new(db: Database, mut engine: Engine, progress: Progress, config: &AtlasConfig) -> Self {
        engine.generate(&progress);
        Self {
            show_confirmation_dialog: false,
            allowed_to_close: false,
            db,
            engine,
            progress,
            progress_storage_key: config.progress_storage_key.clone(),
            simulated_clock: config.simulated_clock,
            current_screen: AppScreen::Main,
            session: None,
            show_result_dialog: false,
            result_message: String::new(),
        }
    }

    /// Renders the main screen: date, statistics and the browse lists
    fn render_main_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut action_next_day = false;
            let mut action_start = false;
            let mut action_export = false;
            let mut action_import = false;
            let mut action_view_deity: Option<String> = None;
            let mut action_read_story: Option<String> = None;

            ui.horizontal(|ui| {
                ui.label(format_iso_date(self.engine.today()));
                if self.simulated_clock && ui.button("Next Day").clicked() {
                    action_next_day = true;
                }
            });
            ui.separator();

            let stats = self.engine.stats();
            let today = self.engine.today_stats();
            ui.heading("Review");
            ui.label(format!(
                "Streak: {} days (best {})",
                stats.current_streak, stats.longest_streak
            ));
            ui.label(format!(
                "Total reviewed: {} ({}% accuracy)",
                stats.total_reviewed, stats.average_accuracy
            ));
            ui.label(format!(
                "Today: {} reviewed, {} correct ({}%)",
                today.reviewed, today.correct, today.accuracy
            ));
            ui.label(format!("Cards due: {}", self.engine.due_count()));

            ui.horizontal(|ui| {
                if ui.button("Start Review").clicked() {
                    action_start = true;
                }
                if ui.button("Export Progress").clicked() {
                    action_export = true;
                }
                if ui.button("Import Progress").clicked() {
                    action_import = true;
                }
            });
            ui.separator();

            let reference = self.engine.reference();

            ui.heading(format!("Deities ({})", reference.deities.len()));
            egui::ScrollArea::vertical()
                .id_source("deities_list")
                .max_height(220.0)
                .show(ui, |ui| {
                    for id in reference.sorted_deity_ids() {
                        let Some(deity) = reference.deity(id) else {
                            continue;
                        };
                        ui.horizontal(|ui| {
                            ui.label(format!(
                                "{} ({})",
                                deity.name,
                                reference.pantheon_name(&deity.pantheon_id)
                            ));
                            if self.progress.has_viewed_deity(id) {
                                ui.label("viewed");
                            } else if ui.button("Mark viewed").clicked() {
                                action_view_deity = Some(id.to_string());
                            }
                        });
                    }
                });

            ui.separator();

            ui.heading(format!("Stories ({})", reference.stories.len()));
            egui::ScrollArea::vertical()
                .id_source("stories_list")
                .max_height(150.0)
                .show(ui, |ui| {
                    for id in reference.sorted_story_ids() {
                        let Some(story) = reference.story(id) else {
                            continue;
                        };
                        ui.horizontal(|ui| {
                            ui.label(&story.title);
                            if self.progress.has_read_story(id) {
                                ui.label("read");
                            } else if ui.button("Mark read").clicked() {
                                action_read_story = Some(id.to_string());
                            }
                        });
                    }
                });

            // Execute deferred actions
            if action_next_day {
                match self.db.advance_day() {
                    Ok(date) => log::info!("Advanced simulated date to {}", date),
                    Err(e) => log::warn!("Could not advance the simulated date: {}", e),
                }
                self.engine.generate(&self.progress);
            }
            if let Some(id) = action_view_deity {
                if self.progress.track_deity_view(&id) {
                    self.progress_changed();
                }
            }
            if let Some(id) = action_read_story {
                if self.progress.track_story_read(&id) {
                    self.progress_changed();
                }
            }
            if action_start {
                self.start_review();
            }
            if action_export {
                self.handle_export();
            }
            if action_import {
                self.handle_import();
            }
        });
    }

    /// Renders one card of the review session, or its summary when done
    fn render_review_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(session) = &mut self.session else {
                self.current_screen = AppScreen::Main;
                return;
            };

            let mut action_back = false;

            if session.is_caught_up() {
                ui.heading("All caught up!");
                ui.label("No cards are due. Explore more deities and stories to add cards.");
                ui.add_space(20.0);
                if ui.button("Back to Main Screen").clicked() {
                    action_back = true;
                }
            } else if session.is_completed() {
                ui.heading("Session complete");
                ui.label(format!(
                    "{} correct, {} to practice ({}% accuracy)",
                    session.correct_count(),
                    session.incorrect_count(),
                    session.accuracy()
                ));
                ui.label(session.encouragement());
                ui.add_space(20.0);
                if ui.button("Back to Main Screen").clicked() {
                    action_back = true;
                }
            } else if let Some(card) = session.current_card() {
                ui.label(format!(
                    "Card {} of {}",
                    session.position(),
                    session.total_count()
                ));
                ui.add(egui::ProgressBar::new(session.progress()));
                ui.add_space(10.0);

                // Clone values to avoid borrowing issues
                let badge = card.card_type.label();
                let question = card.question.clone();
                let answer = card.answer.clone();
                let hint = card.hint.clone();
                let revealed = session.is_answer_revealed();
                let hint_shown = session.is_hint_shown();

                ui.group(|ui| {
                    ui.set_min_height(200.0);
                    ui.vertical_centered(|ui| {
                        ui.add_space(10.0);
                        ui.label(egui::RichText::new(badge).small());
                        ui.add_space(10.0);
                        ui.heading(&question);
                        ui.add_space(20.0);

                        if revealed {
                            ui.label(egui::RichText::new(&answer).strong());
                        } else if let (true, Some(hint)) = (hint_shown, &hint) {
                            ui.label(format!("Hint: {}", hint));
                        }
                        ui.add_space(10.0);
                    });
                });

                ui.add_space(20.0);

                let mut action_hint = false;
                let mut action_reveal = false;
                let mut action_rate: Option<DifficultyRating> = None;

                if revealed {
                    ui.label("How well did you remember?");
                    ui.horizontal(|ui| {
                        for rating in DifficultyRating::ALL {
                            if ui
                                .button(rating.label())
                                .on_hover_text(rating.description())
                                .clicked()
                            {
                                action_rate = Some(rating);
                            }
                        }
                    });
                } else {
                    ui.horizontal(|ui| {
                        if hint.is_some() {
                            let text = if hint_shown { "Hide Hint" } else { "Show Hint" };
                            if ui.button(text).clicked() {
                                action_hint = true;
                            }
                        }
                        if ui.button("Reveal Answer").clicked() {
                            action_reveal = true;
                        }
                    });
                }

                ui.add_space(20.0);
                if ui.button("Back to Main Screen").clicked() {
                    action_back = true;
                }

                // Execute deferred actions
                if action_hint {
                    session.toggle_hint();
                }
                if action_reveal {
                    if let Err(e) = session.reveal() {
                        log::warn!("{}", e);
                    }
                }
                if let Some(rating) = action_rate {
                    if let Err(e) = session.rate(&mut self.engine, rating) {
                        log::warn!("{}", e);
                    }
                }
            }

            if action_back {
                self.current_screen = AppScreen::Main;
                self.session = None;
                self.engine.generate(&self.progress);
            }
        });
    }

    fn progress_changed(&mut self) {
        save_progress(&self.db, &self.progress_storage_key, &self.progress);
        self.engine.generate(&self.progress);
    }

    /// Starts a review session over the cards due today
    fn start_review(&mut self) {
        let mut session = ReviewSession::new();
        match session.start(&mut self.engine, &self.progress) {
            Ok(()) => {
                self.session = Some(session);
                self.current_screen = AppScreen::Review;
            }
            Err(e) => log::error!("Could not start review: {}", e),
        }
    }

    /// Handles review state export to a JSON file
    fn handle_export(&mut self) {
        let file_name = format!("mythos-atlas-{}.json", format_iso_date(self.engine.today()));
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(file_name)
            .add_filter("JSON files", &["json"])
            .save_file()
        else {
            return;
        };

        self.result_message = match export_review_state_to_path(self.engine.state(), &path) {
            Ok(()) => format!(
                "Exported {} card schedules successfully!",
                self.engine.state().cards.len()
            ),
            Err(e) => format!("Export failed: {}", e),
        };
        self.show_result_dialog = true;
    }

    /// Handles review state import from a JSON file, replacing the current one
    fn handle_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        self.result_message = match import_review_state(&path) {
            Ok(state) => {
                let count = state.cards.len();
                self.engine.replace_state(state);
                self.engine.generate(&self.progress);
                format!("Imported {} card schedules successfully!", count)
            }
            Err(e) => format!(
                "Import failed: {}\n\nPlease check that the file is a Mythos Atlas backup.",
                e
            ),
        };
        self.show_result_dialog = true;
    }
}
