//! End-of-game notifications.

use tictactoe_engine::GameOutcome;

/// Text of the dialog shown when a game ends.
///
/// Dismissing the dialog starts a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertItem {
    /// Dialog heading.
    pub title: &'static str,
    /// Dialog body.
    pub message: &'static str,
    /// Label of the dismiss button.
    pub button_title: &'static str,
}

impl AlertItem {
    /// Human completed a line.
    pub const HUMAN_WIN: AlertItem = AlertItem {
        title: "You Win!",
        message: "You just beat the AI!",
        button_title: "Woohoo",
    };

    /// Computer completed a line.
    pub const COMPUTER_WIN: AlertItem = AlertItem {
        title: "You Lost",
        message: "You programmed a super AI",
        button_title: "Oh Nooo",
    };

    /// Board filled up.
    pub const DRAW: AlertItem = AlertItem {
        title: "Draw",
        message: "What a battle of wits",
        button_title: "Try Again",
    };

    /// Dialog for `outcome`, or `None` while the game is still going.
    pub fn for_outcome(outcome: GameOutcome) -> Option<Self> {
        match outcome {
            GameOutcome::InProgress => None,
            GameOutcome::HumanWin => Some(Self::HUMAN_WIN),
            GameOutcome::ComputerWin => Some(Self::COMPUTER_WIN),
            GameOutcome::Draw => Some(Self::DRAW),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_outcome_maps_to_its_dialog() {
        assert_eq!(AlertItem::for_outcome(GameOutcome::InProgress), None);
        assert_eq!(AlertItem::for_outcome(GameOutcome::HumanWin).unwrap().title, "You Win!");
        assert_eq!(AlertItem::for_outcome(GameOutcome::ComputerWin).unwrap().title, "You Lost");
        assert_eq!(AlertItem::for_outcome(GameOutcome::Draw).unwrap().button_title, "Try Again");
    }
}
