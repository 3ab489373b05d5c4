use teloxide::macros::BotCommands as DeriveBotCommands;

#[derive(DeriveBotCommands, Debug, Clone, Copy, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Show welcome message")]
    Start,
    #[command(description = "Translate text")]
    Translate,
    #[command(description = "Show supported languages")]
    Languages,
}

#[cfg(test)]
mod tests {
    use teloxide::utils::command::BotCommands;

    use super::*;

    const BOT_NAME: &str = "translate_bot";

    #[test]
    fn test_parse_commands() {
        let table = [
            ("/start", Some(Command::Start)),
            ("/translate", Some(Command::Translate)),
            ("/languages", Some(Command::Languages)),
            ("/translate@translate_bot", Some(Command::Translate)),
            ("/help", None),
            ("translate", None),
        ];
        for (input, expected) in table {
            assert_eq!(Command::parse(input, BOT_NAME).ok(), expected, "parsing {input}");
        }
    }

    #[test]
    fn test_bot_commands() {
        let names: Vec<_> = Command::bot_commands()
            .into_iter()
            .map(|c| c.command.trim_start_matches('/').to_string())
            .collect();
        assert_eq!(names, ["start", "translate", "languages"]);
    }
}
