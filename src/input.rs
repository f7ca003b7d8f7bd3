use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

/// Input the tool state machine understands, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button went down
    PointerDown { pos: Pos2, modifiers: Modifiers },
    /// Pointer moved while the primary button is held
    PointerMove { pos: Pos2 },
    /// Primary button was released
    PointerUp { pos: Pos2 },
    /// Second click of a double click, delivered after its press/release pair
    DoubleClick { pos: Pos2 },
    Key { key: Key, modifiers: Modifiers },
    /// Typed text
    Text(String),
    /// The canvas lost keyboard/pointer focus
    FocusLost,
}

impl InputEvent {
    pub fn name(&self) -> &'static str {
        match self {
            InputEvent::PointerDown { .. } => "pointer press",
            InputEvent::PointerMove { .. } => "pointer move",
            InputEvent::PointerUp { .. } => "pointer release",
            InputEvent::DoubleClick { .. } => "double click",
            InputEvent::Key { .. } => "key press",
            InputEvent::Text(_) => "text input",
            InputEvent::FocusLost => "focus loss",
        }
    }
}

/// Handles converting raw egui input into editor `InputEvent`s
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    dragging: bool,
    last_pointer_pos: Option<Pos2>,
    had_focus: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            dragging: false,
            last_pointer_pos: None,
            had_focus: true,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// Converts a screen position into canvas space
    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        (screen - self.canvas_rect.min).to_pos2()
    }

    /// Converts a canvas position into screen space
    pub fn to_screen(&self, canvas: Pos2) -> Pos2 {
        self.canvas_rect.min + canvas.to_vec2()
    }

    /// Process raw egui input and generate our InputEvents, in arrival order.
    ///
    /// `wants_keyboard` is false while another widget (e.g. a toolbar field) has focus.
    pub fn process_input(&mut self, ctx: &Context, wants_keyboard: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let focused = input.focused;
            if self.had_focus && !focused {
                events.push(InputEvent::FocusLost);
                self.dragging = false;
            }
            self.had_focus = focused;

            for event in &input.raw.events {
                match event {
                    egui::Event::PointerButton {
                        pos,
                        button: PointerButton::Primary,
                        pressed: true,
                        modifiers,
                    } if self.canvas_rect.contains(*pos) => {
                        self.dragging = true;
                        self.last_pointer_pos = Some(*pos);
                        events.push(InputEvent::PointerDown {
                            pos: self.to_canvas(*pos),
                            modifiers: *modifiers,
                        });
                    }
                    egui::Event::PointerButton {
                        pos,
                        button: PointerButton::Primary,
                        pressed: false,
                        ..
                    } if self.dragging => {
                        self.dragging = false;
                        events.push(InputEvent::PointerUp {
                            pos: self.to_canvas(*pos),
                        });
                    }
                    egui::Event::PointerMoved(pos) if self.dragging => {
                        if self.last_pointer_pos != Some(*pos) {
                            self.last_pointer_pos = Some(*pos);
                            events.push(InputEvent::PointerMove {
                                pos: self.to_canvas(*pos),
                            });
                        }
                    }
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } if wants_keyboard => {
                        events.push(InputEvent::Key {
                            key: *key,
                            modifiers: *modifiers,
                        });
                    }
                    egui::Event::Text(text) if wants_keyboard => {
                        events.push(InputEvent::Text(text.clone()));
                    }
                    _ => {}
                }
            }

            if let Some(pos) = input.pointer.interact_pos() {
                if self.canvas_rect.contains(pos)
                    && input.pointer.button_double_clicked(PointerButton::Primary)
                {
                    events.push(InputEvent::DoubleClick {
                        pos: self.to_canvas(pos),
                    });
                }
            }
        });

        events
    }
}
