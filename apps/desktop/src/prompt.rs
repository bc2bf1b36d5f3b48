//! Line commands understood by `qrng interactive`.

use client_core::CustomForm;

pub const PROMPT_HELP: &str = "\
commands:
  d                        256-bit random value
  c <length> [min] [max]   custom value, '-' leaves a field empty
  h                        this help
  q                        quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    Empty,
    Help,
    Quit,
    Default,
    Custom(CustomForm),
}

pub fn parse_prompt_line(line: &str) -> Result<PromptCommand, String> {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Ok(PromptCommand::Empty);
    };

    match head.to_ascii_lowercase().as_str() {
        "h" | "help" | "?" => Ok(PromptCommand::Help),
        "q" | "quit" | "exit" => Ok(PromptCommand::Quit),
        "d" | "default" => Ok(PromptCommand::Default),
        "c" | "custom" => {
            let fields: Vec<&str> = tokens.collect();
            if fields.len() > 3 {
                return Err(format!(
                    "custom takes at most 3 values (length, min, max), got {}",
                    fields.len()
                ));
            }
            let field = |index: usize| match fields.get(index) {
                Some(&"-") | None => String::new(),
                Some(value) => value.to_string(),
            };
            Ok(PromptCommand::Custom(CustomForm::new(
                field(0),
                field(1),
                field(2),
            )))
        }
        other => Err(format!("unknown command '{other}', type 'h' for help")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_commands() {
        assert_eq!(parse_prompt_line("   "), Ok(PromptCommand::Empty));
        assert_eq!(parse_prompt_line("d"), Ok(PromptCommand::Default));
        assert_eq!(parse_prompt_line("DEFAULT"), Ok(PromptCommand::Default));
        assert_eq!(parse_prompt_line("q"), Ok(PromptCommand::Quit));
        assert_eq!(parse_prompt_line("?"), Ok(PromptCommand::Help));
    }

    #[test]
    fn parses_custom_fields_with_placeholders() {
        assert_eq!(
            parse_prompt_line("c 8 1 100"),
            Ok(PromptCommand::Custom(CustomForm::new("8", "1", "100")))
        );
        assert_eq!(
            parse_prompt_line("c 8 1 -"),
            Ok(PromptCommand::Custom(CustomForm::new("8", "1", "")))
        );
        assert_eq!(
            parse_prompt_line("custom 16 -5"),
            Ok(PromptCommand::Custom(CustomForm::new("16", "-5", "")))
        );
    }

    #[test]
    fn custom_without_length_is_left_for_validation() {
        assert_eq!(
            parse_prompt_line("c"),
            Ok(PromptCommand::Custom(CustomForm::default()))
        );
    }

    #[test]
    fn rejects_unknown_and_overlong_input() {
        assert!(parse_prompt_line("roll").is_err());
        assert!(parse_prompt_line("c 8 1 2 3").is_err());
    }
}
