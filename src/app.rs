//! The application: calculator state, its widgets and the event loop.
//!
//! [`View`] holds everything that does not touch the terminal, so key
//! handling and painting can be exercised in memory. [`App`] wraps a view
//! in a [`Screen`] and runs the loop.

use crate::actor::{InputEvent, KeyCode, KeyModifiers, Screen};
use crate::buffer::{Buffer, Cell, Modifiers};
use crate::calc::{Calculator, ChainMode, Key};
use crate::config::{AppConfig, Theme, APP_NAME};
use crate::error::{Error, Result};
use crate::layout::{KeypadLayout, Rect};
use crate::widget::{DisplayWidget, KeypadWidget, StatusBar, StatusBarStyle, Widget};

/// What an input event asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Forward a key to the calculator.
    Press(Key),
    /// Leave the app.
    Quit,
    /// The terminal changed size.
    Resize {
        /// New width.
        width: u16,
        /// New height.
        height: u16,
    },
    /// Nothing to do.
    Ignore,
}

/// Map a keyboard or terminal event to an action.
///
/// `q` and Ctrl-C quit, Esc and Delete clear, Enter is `=`, other
/// characters go through [`Key::from_char`]. Mouse clicks are left to the
/// keypad widget.
pub fn translate(event: &InputEvent) -> Action {
    match *event {
        InputEvent::Key {
            code: KeyCode::Char('c' | 'C'),
            modifiers: KeyModifiers { control: true, .. },
        }
        | InputEvent::Key {
            code: KeyCode::Char('q' | 'Q'),
            ..
        }
        | InputEvent::Shutdown => Action::Quit,
        InputEvent::Key {
            modifiers: KeyModifiers { control: true, .. } | KeyModifiers { alt: true, .. },
            ..
        } => Action::Ignore,
        InputEvent::Key { code, .. } => match code {
            KeyCode::Esc | KeyCode::Delete => Action::Press(Key::Clear),
            KeyCode::Enter => Action::Press(Key::Equals),
            KeyCode::Char(c) => Key::from_char(c).map_or(Action::Ignore, Action::Press),
            KeyCode::Backspace => Action::Ignore,
        },
        InputEvent::Resize { width, height } => Action::Resize { width, height },
        InputEvent::MouseDown { .. } => Action::Ignore,
        InputEvent::Error(ref message) => {
            tracing::warn!(%message, "input error");
            Action::Ignore
        }
    }
}

/// Press every key in `keys` on a fresh calculator and return the display.
///
/// Whitespace is skipped; any other character without a key is an error.
pub fn evaluate(keys: &str, chain: ChainMode) -> Result<String> {
    let mut calculator = Calculator::with_chain(chain);
    for c in keys.chars().filter(|c| !c.is_whitespace()) {
        let key = Key::from_char(c).ok_or(Error::InvalidKey(c))?;
        calculator.press(key);
    }
    Ok(calculator.display())
}

/// What the next paint has to send to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repaint {
    /// Nothing changed.
    None,
    /// Repaint everything.
    Full,
    /// Only these regions changed.
    Regions(Vec<Rect>),
}

/// Calculator state plus the widgets showing it.
#[derive(Debug)]
pub struct View {
    calculator: Calculator,
    layout: Option<KeypadLayout>,
    display: DisplayWidget,
    keypad: KeypadWidget,
    hint: StatusBar,
    theme: Theme,
    frame: Buffer,
    full_repaint: bool,
}

impl View {
    /// A view sized for a `width`×`height` terminal.
    pub fn new(calculator: Calculator, theme: Theme, width: u16, height: u16) -> Self {
        let style = StatusBarStyle {
            bg: theme.background,
            fg: theme.hint_fg,
        };
        let mut view = Self {
            calculator,
            layout: None,
            display: DisplayWidget::new(Rect::ZERO, theme),
            keypad: KeypadWidget::new(theme),
            hint: StatusBar::new(Rect::ZERO, style),
            theme,
            frame: Buffer::new(width.max(1), height.max(1)),
            full_repaint: true,
        };
        view.resize(width, height);
        view.sync();
        view
    }

    /// The calculator being shown.
    pub const fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// The current layout, `None` while the terminal is too small.
    pub const fn layout(&self) -> Option<&KeypadLayout> {
        self.layout.as_ref()
    }

    /// The painted frame.
    pub const fn frame(&self) -> &Buffer {
        &self.frame
    }

    /// Re-layout for a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.frame.resize(width.max(1), height.max(1));
        self.full_repaint = true;
        match KeypadLayout::compute(self.frame.area()) {
            Ok(layout) => {
                self.display.set_bounds(layout.display);
                self.keypad.set_layout(&layout);
                self.hint.set_bounds(layout.hint);
                self.layout = Some(layout);
            }
            Err(e) => {
                tracing::warn!(error = %e, "keypad hidden");
                self.layout = None;
            }
        }
    }

    /// Work out what an event means, including clicks on keys.
    pub fn action_for(&mut self, event: &InputEvent) -> Action {
        match event {
            InputEvent::MouseDown { .. } if self.layout.is_some() => {
                self.keypad.handle_input(event).map_or(Action::Ignore, Action::Press)
            }
            _ => translate(event),
        }
    }

    /// Apply a key and refresh the widgets. Returns `true` if the
    /// calculator changed.
    pub fn press(&mut self, key: Key) -> bool {
        let changed = self.calculator.press(key);
        if changed {
            self.sync();
        }
        changed
    }

    fn sync(&mut self) {
        self.display.update(&self.calculator);
        self.keypad.update(&self.calculator);
        self.hint.set_all(APP_NAME, "q quit", self.calculator.chain().to_string());
    }

    /// Paint whatever changed into the frame.
    pub fn render(&mut self) -> Repaint {
        let frame = &mut self.frame;
        let mut widgets: [&mut dyn Widget; 3] = [&mut self.display, &mut self.keypad, &mut self.hint];

        if self.layout.is_none() {
            for widget in &mut widgets {
                widget.clear_redraw();
            }
            if !self.full_repaint {
                return Repaint::None;
            }
            self.full_repaint = false;
            frame.fill(Cell::EMPTY.with_bg(self.theme.background));
            let message = format!(
                "enlarge to {}x{}",
                crate::layout::MIN_WIDTH,
                crate::layout::MIN_HEIGHT
            );
            let width = u16::try_from(message.chars().count()).unwrap_or(u16::MAX);
            let area = frame.area();
            let at = area.centered(width, 1);
            frame.put_str(
                at.x,
                at.y,
                &message,
                (self.theme.display_fg, self.theme.background, Modifiers::empty()),
                area,
            );
            return Repaint::Full;
        }

        if self.full_repaint {
            self.full_repaint = false;
            frame.fill(Cell::EMPTY.with_bg(self.theme.background));
            for widget in &mut widgets {
                widget.render(frame);
                widget.clear_redraw();
            }
            return Repaint::Full;
        }

        let mut dirty = Vec::new();
        for widget in &mut widgets {
            if widget.needs_redraw() {
                widget.render(frame);
                widget.clear_redraw();
                dirty.push(widget.bounds());
            }
        }
        if dirty.is_empty() {
            Repaint::None
        } else {
            Repaint::Regions(dirty)
        }
    }
}

/// The calculator running in the terminal.
pub struct App {
    screen: Screen,
    view: View,
}

impl App {
    /// Take over the terminal and lay out the keypad.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let screen = Screen::open(config.screen.clone())?;
        let area = screen.area();
        let view = View::new(
            Calculator::with_chain(config.chain),
            config.theme,
            area.width,
            area.height,
        );
        Ok(Self { screen, view })
    }

    /// Run until the user quits. The terminal is restored when `self`
    /// drops.
    pub fn run(mut self) -> Result<()> {
        tracing::info!(chain = %self.view.calculator().chain(), "calculator started");
        self.present();

        loop {
            self.screen.begin_frame();
            let Some(first) = self.screen.wait_input(self.screen.frame_duration()) else {
                continue;
            };

            let mut next = Some(first);
            while let Some(event) = next {
                match self.view.action_for(&event) {
                    Action::Quit => {
                        tracing::info!(
                            display = %self.view.calculator().display(),
                            "calculator stopped"
                        );
                        return Ok(());
                    }
                    Action::Resize { width, height } => {
                        self.screen.handle_resize(width, height);
                        self.view.resize(width, height);
                    }
                    Action::Press(key) => {
                        self.view.press(key);
                    }
                    Action::Ignore => {}
                }
                next = self.screen.poll_input();
            }

            self.present();
            self.screen.end_frame();
        }
    }

    fn present(&mut self) {
        match self.view.render() {
            Repaint::None => {}
            Repaint::Full => self.screen.redraw(self.view.frame()),
            Repaint::Regions(dirty) => self.screen.present(self.view.frame(), dirty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::Operation;

    fn view() -> View {
        View::new(Calculator::new(), Theme::default(), 40, 30)
    }

    fn char_key(c: char) -> InputEvent {
        InputEvent::key(KeyCode::Char(c))
    }

    #[test]
    fn test_translate_keys() {
        assert_eq!(translate(&char_key('7')), Action::Press(Key::Digit(7)));
        assert_eq!(translate(&char_key('*')), Action::Press(Key::Operation(Operation::Multiply)));
        assert_eq!(translate(&char_key('c')), Action::Press(Key::Clear));
        assert_eq!(translate(&InputEvent::key(KeyCode::Esc)), Action::Press(Key::Clear));
        assert_eq!(translate(&InputEvent::key(KeyCode::Enter)), Action::Press(Key::Equals));
        assert_eq!(translate(&char_key('z')), Action::Ignore);
    }

    #[test]
    fn test_translate_quit() {
        assert_eq!(translate(&char_key('q')), Action::Quit);
        let ctrl_c = InputEvent::Key {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(translate(&ctrl_c), Action::Quit);
        assert_eq!(translate(&InputEvent::Shutdown), Action::Quit);
    }

    #[test]
    fn test_translate_ignores_other_control_keys() {
        let ctrl_one = InputEvent::Key {
            code: KeyCode::Char('1'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(translate(&ctrl_one), Action::Ignore);
        assert_eq!(translate(&InputEvent::Error(String::from("eof"))), Action::Ignore);
    }

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate("12 + 30 =", ChainMode::Immediate).unwrap(), "42");
        assert_eq!(evaluate("2+3*4=", ChainMode::Immediate).unwrap(), "24");
        assert_eq!(evaluate("2+3*4=", ChainMode::Deferred).unwrap(), "20");
        assert_eq!(evaluate("9/0=", ChainMode::Immediate).unwrap(), "0");
        assert_eq!(evaluate("5%", ChainMode::Immediate).unwrap(), "0.05");
        assert!(matches!(evaluate("1+a", ChainMode::Immediate), Err(Error::InvalidKey('a'))));
    }

    #[test]
    fn test_first_render_is_full() {
        let mut view = view();
        assert_eq!(view.render(), Repaint::Full);
        assert_eq!(view.render(), Repaint::None);
    }

    #[test]
    fn test_key_press_repaints_display_only() {
        let mut view = view();
        view.render();
        assert!(view.press(Key::Digit(7)));
        let display = view.layout().unwrap().display;
        let keypad = view.layout().unwrap().keypad;
        // the clear key turns from AC to C as well
        assert_eq!(view.render(), Repaint::Regions(vec![display, keypad]));

        assert!(view.press(Key::Digit(8)));
        assert_eq!(view.render(), Repaint::Regions(vec![display]));
    }

    #[test]
    fn test_ignored_key_paints_nothing() {
        let mut view = view();
        view.render();
        assert!(!view.press(Key::Equals));
        assert_eq!(view.render(), Repaint::None);
    }

    #[test]
    fn test_click_presses_key() {
        let mut view = view();
        let five = view.layout().unwrap().rect_of(Key::Digit(5)).unwrap();
        let click = InputEvent::MouseDown {
            x: five.x + 2,
            y: five.y + 1,
        };
        assert_eq!(view.action_for(&click), Action::Press(Key::Digit(5)));
        assert_eq!(view.action_for(&InputEvent::MouseDown { x: 0, y: 0 }), Action::Ignore);
    }

    #[test]
    fn test_too_small_shows_message() {
        let mut view = View::new(Calculator::new(), Theme::default(), 20, 10);
        assert!(view.layout().is_none());
        assert_eq!(view.render(), Repaint::Full);
        assert!(view.frame().row_text(4).contains("enlarge to 25x20"));

        // keys still reach the calculator
        view.press(Key::Digit(3));
        assert_eq!(view.render(), Repaint::None);
        view.resize(40, 30);
        assert_eq!(view.render(), Repaint::Full);
        let display = view.layout().unwrap().display;
        assert!(view.frame().row_text(display.bottom() - 1).contains(" _|"));
    }
}
