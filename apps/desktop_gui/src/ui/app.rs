use std::time::Duration;

use client_core::{error::TRANSPORT_ERROR_PREFIX, render::LOADING_MESSAGE, FormState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{element_ids, ClassificationView, DisplayState, SelectedFile};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "pdf"];

pub struct TriageApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    api_url: String,
    form: FormState,
    /// Buffer bound to the text box; mirrored into `form` on every edit.
    text_draft: String,
    display: DisplayState,
    status: String,
}

impl TriageApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, api_url: String) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            api_url,
            form: FormState::new(),
            text_draft: String::new(),
            display: DisplayState::Hidden,
            status: "Iniciando...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::SubmissionResolved(state) => {
                    self.display = state;
                }
                UiEvent::HealthChecked(Ok(status)) => {
                    self.status = format!("API respondeu: {status}");
                }
                UiEvent::HealthChecked(Err(reason)) => {
                    self.status = format!("API indisponível: {reason}");
                }
                UiEvent::BackendFailed(message) => {
                    tracing::error!("backend failure: {message}");
                    self.status = message;
                }
            }
        }
    }

    fn pick_file(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Email (.txt, .pdf)", ACCEPTED_EXTENSIONS)
            .pick_file();
        self.select_file(picked.map(SelectedFile::from_path));
    }

    fn select_file(&mut self, file: Option<SelectedFile>) {
        self.form.on_file_change(file);
        self.text_draft = self.form.text().to_string();
    }

    fn text_changed(&mut self) {
        self.form.on_text_input(self.text_draft.clone());
    }

    fn submit(&mut self) {
        let submission = match self.form.submission() {
            Ok(submission) => submission,
            Err(err) => {
                self.display = DisplayState::Error(err.display_message());
                return;
            }
        };

        self.display = DisplayState::Loading;
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Submit { submission },
            &mut self.status,
        );
        if !queued {
            self.display = DisplayState::Error(format!("{TRANSPORT_ERROR_PREFIX} {}", self.status));
        }
    }

    fn check_health(&mut self) {
        if dispatch_backend_command(&self.cmd_tx, BackendCommand::CheckHealth, &mut self.status) {
            self.status = "Verificando API...".to_string();
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.push_id(element_ids::FILE_INPUT, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Escolher arquivo").clicked() {
                    self.pick_file();
                }
                if self.form.file().is_some() && ui.small_button("Remover").clicked() {
                    self.select_file(None);
                }
                ui.push_id(element_ids::SELECTED_FILE_LABEL, |ui| {
                    ui.label(self.form.file_label());
                });
            });
        });

        ui.add_space(6.0);
        ui.label("Ou cole o texto do email:");
        let text_resp = ui.add(
            egui::TextEdit::multiline(&mut self.text_draft)
                .id_salt(element_ids::TEXT_INPUT)
                .hint_text("Cole aqui o conteúdo do email...")
                .desired_rows(8)
                .desired_width(f32::INFINITY),
        );
        if text_resp.changed() {
            self.text_changed();
        }
        let shortcut = text_resp.has_focus()
            && ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter));

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let submit_btn = egui::Button::new(egui::RichText::new("Enviar").strong())
                .min_size(egui::vec2(120.0, 32.0));
            if ui.add(submit_btn).clicked() || shortcut {
                self.submit();
            }
            if ui.button("Verificar API").clicked() {
                self.check_health();
            }
        });
    }

    fn show_response_area(&self, ui: &mut egui::Ui) {
        match &self.display {
            DisplayState::Hidden => {}
            DisplayState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(LOADING_MESSAGE);
                });
            }
            DisplayState::Error(message) => {
                ui.colored_label(ui.visuals().error_fg_color, message);
            }
            DisplayState::Result(view) => show_classification(ui, view),
        }
    }
}

// Labels render their text verbatim; nothing here is parsed as markup.
fn show_classification(ui: &mut egui::Ui, view: &ClassificationView) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(egui::RichText::new("Texto Enviado:").strong());
        ui.label(&view.original_text);
        ui.separator();
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Categoria:").strong());
            ui.label(&view.category);
        });
        ui.label(egui::RichText::new("Resposta automática:").strong());
        ui.label(&view.reply);
        if ui.small_button("Copiar resposta").clicked() {
            ui.ctx().copy_text(view.reply.clone());
        }
    });
}

impl eframe::App for TriageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Classificador de Emails");
                ui.weak(&self.api_url);
                ui.add_space(10.0);
                ui.push_id(element_ids::FORM, |ui| self.show_form(ui));
                ui.add_space(12.0);
                ui.separator();
                self.show_response_area(ui);
            });
        });

        if matches!(self.display, DisplayState::Loading) {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
