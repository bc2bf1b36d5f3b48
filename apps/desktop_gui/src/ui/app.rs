use std::time::Duration;

use client_core::{render, CustomForm, ViewState};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiEvent},
    orchestration::dispatch_backend_command,
};

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);
const DATA_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 0);

pub struct RandomGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: ViewState,
    form: CustomForm,
    status: String,
    info: String,
    backend_error: Option<UiError>,
}

impl RandomGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view: ViewState::default(),
            form: CustomForm::default(),
            status: String::new(),
            info: String::new(),
            backend_error: None,
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.info = message,
                UiEvent::ViewChanged(state) => self.view = state,
                UiEvent::Error(err) => {
                    tracing::error!("backend error: {}", err.message());
                    self.backend_error = Some(err);
                }
            }
        }
    }

    pub fn request_default(&mut self) {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::RequestDefault, &mut self.status);
    }

    pub fn request_custom(&mut self) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::RequestCustom(self.form.clone()),
            &mut self.status,
        );
    }

    fn show_page(&mut self, ui: &mut egui::Ui) {
        ui.heading("⚛ Quantum RNG");
        if !self.info.is_empty() {
            ui.small(&self.info);
        }
        ui.add_space(16.0);

        if ui.button("Generate 256-bit Random").clicked() {
            self.request_default();
        }

        ui.add_space(24.0);
        ui.label(egui::RichText::new("Custom Random Number").size(18.0).strong());
        ui.add_space(6.0);
        let mut submit = false;
        ui.horizontal(|ui| {
            let fields = [
                (&mut self.form.length, "Bit length", 160.0),
                (&mut self.form.min, "Min", 110.0),
                (&mut self.form.max, "Max", 110.0),
            ];
            for (value, hint, width) in fields {
                let response = ui.add(
                    egui::TextEdit::singleline(value)
                        .hint_text(hint)
                        .desired_width(width),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
            }
            if ui.button("Generate").clicked() {
                submit = true;
            }
        });
        if submit {
            self.request_custom();
        }

        if !self.status.is_empty() {
            ui.colored_label(ERROR_COLOR, &self.status);
        }
        if let Some(err) = &self.backend_error {
            ui.colored_label(ERROR_COLOR, err.message());
            ui.small(err.hint());
        }

        ui.add_space(16.0);
        let rendered = render(&self.view);
        if let Some(loading) = rendered.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(egui::RichText::new(loading).color(egui::Color32::GRAY));
            });
        }
        if let Some(error) = rendered.error {
            ui.colored_label(ERROR_COLOR, error);
            if let Some(classified) = UiError::from_view(&self.view) {
                ui.small(classified.hint());
            }
        }
        if let Some(data) = rendered.data {
            ui.add_space(12.0);
            egui::Frame::NONE
                .fill(egui::Color32::from_gray(17))
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(data).monospace().color(DATA_COLOR),
                            )
                            .wrap(),
                        );
                    });
                });
        }
    }
}

impl eframe::App for RandomGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_page(ui);
        });

        if self.view_state().loading {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn applies_latest_view_state_from_backend() {
        let (cmd_tx, _cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let mut app = RandomGuiApp::new(cmd_tx, ui_rx);

        ui_tx
            .send(UiEvent::ViewChanged(ViewState {
                loading: true,
                ..ViewState::default()
            }))
            .expect("send");
        ui_tx
            .send(UiEvent::ViewChanged(ViewState {
                error: Some("network error: connection refused".to_string()),
                ..ViewState::default()
            }))
            .expect("send");
        app.process_ui_events();

        assert!(!app.view_state().loading);
        assert_eq!(
            app.view_state().error.as_deref(),
            Some("network error: connection refused")
        );
    }

    #[test]
    fn submits_form_contents_as_custom_request() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (_ui_tx, ui_rx) = bounded(4);
        let mut app = RandomGuiApp::new(cmd_tx, ui_rx);
        app.form = CustomForm::new("8", "1", "100");

        app.request_custom();
        app.request_default();

        assert_eq!(
            cmd_rx.try_recv().expect("custom"),
            BackendCommand::RequestCustom(CustomForm::new("8", "1", "100"))
        );
        assert_eq!(cmd_rx.try_recv().expect("default"), BackendCommand::RequestDefault);
    }
}
