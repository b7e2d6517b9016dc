//! The 5-4-3-2-1 grounding exercise as an ordered, immutable step table.
//!
//! Steps are an inline literal sequence consumed by an index-based state
//! machine: "advance" moves forward one step at a time, never backwards and
//! never past the terminal step.

/// One screen of the grounding exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Position in the sequence.
    pub id: usize,
    /// Heading shown above the description.
    pub title: &'static str,
    /// Body text; when `highlight` is set this is the leading fragment.
    pub description: &'static str,
    /// Emphasised word inside the description, if any.
    pub highlight: Option<&'static str>,
    /// Fragment following the highlighted word.
    pub suffix: Option<&'static str>,
    /// Secondary line under the description.
    pub sub_description: Option<&'static str>,
    /// Label of the advance button; the terminal step has none.
    pub button_text: Option<&'static str>,
    /// Decorative emoji for the step.
    pub emoji: &'static str,
    /// Stars earned so far, 0–5, non-decreasing across the sequence.
    pub stars: u8,
    /// Whether this step completes the exercise.
    pub is_final: bool,
}

/// The full exercise, in presentation order.
pub const STEPS: [Step; 7] = [
    Step {
        id: 0,
        title: "Olá!",
        description: "Vamos nos acalmar juntos?",
        highlight: None,
        suffix: None,
        sub_description: Some("Tenho um desafio para você!"),
        button_text: Some("Começar!"),
        emoji: "🧸",
        stars: 0,
        is_final: false,
    },
    Step {
        id: 1,
        title: "Fase 1",
        description: "Encontre 5 coisas que você pode ",
        highlight: Some("ver"),
        suffix: Some(" agora."),
        sub_description: None,
        button_text: Some("Já concluí!"),
        emoji: "👁️",
        stars: 1,
        is_final: false,
    },
    Step {
        id: 2,
        title: "Fase 2",
        description: "Encontre 4 coisas que você pode ",
        highlight: Some("tocar"),
        suffix: Some("."),
        sub_description: None,
        button_text: Some("Já concluí!"),
        emoji: "🧤",
        stars: 2,
        is_final: false,
    },
    Step {
        id: 3,
        title: "Fase 3",
        description: "Encontre 3 sons que você pode ",
        highlight: Some("ouvir"),
        suffix: Some("."),
        sub_description: None,
        button_text: Some("Já concluí!"),
        emoji: "👂",
        stars: 3,
        is_final: false,
    },
    Step {
        id: 4,
        title: "Fase 4",
        description: "Encontre 2 coisas que você pode ",
        highlight: Some("cheirar"),
        suffix: Some("."),
        sub_description: None,
        button_text: Some("Já concluí!"),
        emoji: "👃",
        stars: 4,
        is_final: false,
    },
    Step {
        id: 5,
        title: "Fase 5",
        description: "Encontre 1 coisa para ",
        highlight: Some("sentir o gosto"),
        suffix: Some("."),
        sub_description: None,
        button_text: Some("Já concluí!"),
        emoji: "👅",
        stars: 5,
        is_final: false,
    },
    Step {
        id: 6,
        title: "Muito bem!",
        description: "Agora estamos menos ansiosos e mais presentes. ❤️",
        highlight: None,
        suffix: None,
        sub_description: None,
        button_text: None,
        emoji: "🥳",
        stars: 5,
        is_final: true,
    },
];

/// Forward-only cursor over [`STEPS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExerciseFlow {
    current: usize,
}

impl ExerciseFlow {
    /// Start at the greeting step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The step currently shown.
    #[must_use]
    pub fn step(&self) -> &'static Step {
        // `current` never leaves 0..STEPS.len(); `advance` is the only writer.
        &STEPS[self.current.min(STEPS.len() - 1)]
    }

    /// Move forward one step. Returns `false` once the terminal step is
    /// reached; there is no backward or skipping transition.
    pub fn advance(&mut self) -> bool {
        if self.current < STEPS.len() - 1 {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Whether the terminal step has been reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.step().is_final
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn stars_never_decrease_and_cap_at_five() {
        let mut previous = 0;
        for step in &STEPS {
            assert!(step.stars >= previous, "stars regressed at step {}", step.id);
            assert!(step.stars <= 5);
            previous = step.stars;
        }
    }

    #[rstest]
    fn only_the_last_step_is_terminal_and_buttonless() {
        for (index, step) in STEPS.iter().enumerate() {
            let last = index == STEPS.len() - 1;
            assert_eq!(step.is_final, last);
            assert_eq!(step.button_text.is_none(), last);
            assert_eq!(step.id, index);
        }
    }

    #[rstest]
    fn advances_linearly_to_the_terminal_step_and_stops() {
        let mut flow = ExerciseFlow::new();
        assert_eq!(flow.step().id, 0);
        assert!(!flow.is_complete());

        let mut advances = 0;
        while flow.advance() {
            advances += 1;
        }
        assert_eq!(advances, STEPS.len() - 1);
        assert!(flow.is_complete());
        assert_eq!(flow.step().id, STEPS.len() - 1);

        // Further advances are no-ops.
        assert!(!flow.advance());
        assert_eq!(flow.step().id, STEPS.len() - 1);
    }
}
