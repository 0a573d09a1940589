//! Per-tick input snapshot.
//!
//! The window layer translates raw key events into [`Button`] presses and
//! releases; systems read `held` levels and `pressed` edges. Edges last one
//! tick: the owner calls [`InputState::clear_edges`] after each tick.

/// Logical buttons the simulation understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    /// Walk left.
    MoveLeft,
    /// Walk right.
    MoveRight,
    /// Jump (edge-triggered).
    Jump,
    /// Run faster while held.
    Sprint,
}

const BUTTON_COUNT: usize = 4;

impl Button {
    /// Every button, in index order.
    pub const ALL: [Self; BUTTON_COUNT] = [Self::MoveLeft, Self::MoveRight, Self::Jump, Self::Sprint];

    const fn index(self) -> usize {
        match self {
            Button::MoveLeft => 0,
            Button::MoveRight => 1,
            Button::Jump => 2,
            Button::Sprint => 3,
        }
    }
}

/// Held levels and just-pressed edges for every [`Button`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; BUTTON_COUNT],
    pressed: [bool; BUTTON_COUNT],
}

impl InputState {
    /// Creates a state with nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a button going down. Raises the edge only on a transition.
    pub fn press(&mut self, button: Button) {
        let i = button.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    /// Records a button going up.
    pub fn release(&mut self, button: Button) {
        self.held[button.index()] = false;
    }

    /// Drops this tick's edges, keeping held levels.
    pub fn clear_edges(&mut self) {
        self.pressed = [false; BUTTON_COUNT];
    }

    /// Returns true while the button is down.
    #[inline]
    #[must_use]
    pub fn held(&self, button: Button) -> bool {
        self.held[button.index()]
    }

    /// Returns true if the button went down since the last [`InputState::clear_edges`].
    #[inline]
    #[must_use]
    pub fn pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    /// Horizontal movement axis: right minus left, in `{-1, 0, 1}`.
    #[must_use]
    pub fn move_axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.held(Button::MoveLeft) {
            axis -= 1.0;
        }
        if self.held(Button::MoveRight) {
            axis += 1.0;
        }
        axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_lasts_until_cleared() {
        let mut input = InputState::new();
        input.press(Button::Jump);
        assert!(input.held(Button::Jump));
        assert!(input.pressed(Button::Jump));

        input.clear_edges();
        assert!(input.held(Button::Jump));
        assert!(!input.pressed(Button::Jump));

        // Auto-repeat while held raises no new edge
        input.press(Button::Jump);
        assert!(!input.pressed(Button::Jump));

        input.release(Button::Jump);
        input.press(Button::Jump);
        assert!(input.pressed(Button::Jump));
    }

    #[test]
    fn test_move_axis() {
        let mut input = InputState::new();
        assert!(input.move_axis().abs() < f32::EPSILON);
        input.press(Button::MoveLeft);
        assert!((input.move_axis() + 1.0).abs() < f32::EPSILON);
        input.press(Button::MoveRight);
        assert!(input.move_axis().abs() < f32::EPSILON, "opposing buttons cancel");
        input.release(Button::MoveLeft);
        assert!((input.move_axis() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_all_buttons_distinct() {
        let mut input = InputState::new();
        for button in Button::ALL {
            input.press(button);
            assert_eq!(
                Button::ALL.iter().filter(|&&b| input.held(b)).count(),
                button.index() + 1
            );
        }
    }
}
