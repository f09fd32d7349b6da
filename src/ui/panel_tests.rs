/*
 * Unit tests for the panel input grammar
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod panel_tests {
    use crate::shared::Command;
    use crate::ui::panel::{parse_line, PanelInput};

    #[test]
    fn test_parse_floor_request() {
        assert_eq!(
            parse_line("5", 7),
            Ok(PanelInput::Car(Command::RequestFloor(5)))
        );
    }

    #[test]
    fn test_parse_external_call() {
        assert_eq!(
            parse_line("call 3", 7),
            Ok(PanelInput::Car(Command::ExternalCall(3)))
        );
    }

    #[test]
    fn test_parse_door_buttons_and_aliases() {
        assert_eq!(parse_line("open", 7), Ok(PanelInput::Car(Command::OpenDoors)));
        assert_eq!(parse_line("o", 7), Ok(PanelInput::Car(Command::OpenDoors)));
        assert_eq!(
            parse_line("close", 7),
            Ok(PanelInput::Car(Command::CloseDoors))
        );
        assert_eq!(parse_line("c", 7), Ok(PanelInput::Car(Command::CloseDoors)));
        assert_eq!(parse_line("quit", 7), Ok(PanelInput::Quit));
        assert_eq!(parse_line("q", 7), Ok(PanelInput::Quit));
    }

    #[test]
    fn test_rejects_out_of_range_floor() {
        assert!(parse_line("0", 7).is_err());
        assert!(parse_line("8", 7).is_err());
        assert!(parse_line("call 8", 7).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_line("sideways", 7).is_err());
        assert!(parse_line("call", 7).is_err());
        assert!(parse_line("call x", 7).is_err());
        assert!(parse_line("3 4", 7).is_err());
    }
}
