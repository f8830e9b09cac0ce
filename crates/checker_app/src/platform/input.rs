use checker_core::Msg;

use super::app::AppEvent;

pub const HELP_TEXT: &str = "\
Commands:
  symptoms <text>   describe the symptoms (required)
  age <text>        optional age
  sex <text>        optional sex
  submit            check the current symptoms
  show              print the current form and result
  help              show this help
  quit              leave the session";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command `{0}`, type `help` for the list")]
    UnknownCommand(String),
    #[error("`{0}` takes no argument")]
    UnexpectedArgument(String),
}

/// Parses one line of the interactive session. Blank lines yield `Ok(None)`.
///
/// Field commands without an argument clear the field.
pub fn parse_line(line: &str) -> Result<Option<AppEvent>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "symptoms" => AppEvent::Core(Msg::SymptomsChanged(rest.to_string())),
        "age" => AppEvent::Core(Msg::AgeChanged(rest.to_string())),
        "sex" => AppEvent::Core(Msg::SexChanged(rest.to_string())),
        "submit" => no_argument(command, rest, AppEvent::Core(Msg::SubmitClicked))?,
        "show" => no_argument(command, rest, AppEvent::Show)?,
        "help" | "?" => AppEvent::Help,
        "quit" | "exit" => AppEvent::Quit,
        _ => return Err(InputError::UnknownCommand(command.to_string())),
    };
    Ok(Some(event))
}

fn no_argument(command: &str, rest: &str, event: AppEvent) -> Result<AppEvent, InputError> {
    if rest.is_empty() {
        Ok(event)
    } else {
        Err(InputError::UnexpectedArgument(command.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_commands_keep_inner_text() {
        assert_eq!(
            parse_line("symptoms  fever, cough  ").unwrap(),
            Some(AppEvent::Core(Msg::SymptomsChanged("fever, cough".to_string())))
        );
        assert_eq!(
            parse_line("AGE 34").unwrap(),
            Some(AppEvent::Core(Msg::AgeChanged("34".to_string())))
        );
        assert_eq!(
            parse_line("sex").unwrap(),
            Some(AppEvent::Core(Msg::SexChanged(String::new())))
        );
    }

    #[test]
    fn control_commands() {
        assert_eq!(
            parse_line("submit").unwrap(),
            Some(AppEvent::Core(Msg::SubmitClicked))
        );
        assert_eq!(parse_line("show").unwrap(), Some(AppEvent::Show));
        assert_eq!(parse_line("?").unwrap(), Some(AppEvent::Help));
        assert_eq!(parse_line("exit").unwrap(), Some(AppEvent::Quit));
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            parse_line("diagnose me").unwrap_err(),
            InputError::UnknownCommand("diagnose".to_string())
        );
        assert_eq!(
            parse_line("submit now").unwrap_err(),
            InputError::UnexpectedArgument("submit".to_string())
        );
    }
}
