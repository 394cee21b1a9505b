use crate::config::Config;
use crate::decision_policy::Outcome;
use crate::device_display::interface::DeviceDisplay;
use crate::render::outcome_text;

pub struct DeviceDisplayConsole {
    config: Config,
}

impl DeviceDisplayConsole {
    pub fn new(config: Config) -> Self {
        let display = Self { config };
        display.render_display(&display.config.placeholder_message);
        display
    }

    fn render_display(&self, text: &str) {
        println!("{}", boxed(text));
    }
}

fn boxed(text: &str) -> String {
    let width = text.chars().count();
    let border = "─".repeat(width + 2);
    format!("┌{}┐\n│ {} │\n└{}┘", border, text, border)
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn emit(&self, outcome: &Outcome) {
        self.render_display(&outcome_text(&self.config, outcome));
    }

    fn dismiss(&self) {
        println!("(display dismissed)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_fits_text() {
        assert_eq!(boxed("nike"), "┌──────┐\n│ nike │\n└──────┘");
    }
}
