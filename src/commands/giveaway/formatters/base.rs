use crate::commands::giveaway::models::Entrant;

pub trait RosterFormatter {
    // Renders one line of the entry listing with its 1-based entry number.
    fn entry_line(&self, number: usize, entrant: &Entrant) -> String;
    // Renders one line of the winner listing with its 1-based pick order.
    fn winner_line(&self, number: usize, entrant: &Entrant) -> String;
}
