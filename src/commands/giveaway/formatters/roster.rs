// Special module that contains various
// formatters for the giveaway listings
use crate::commands::giveaway::formatters::base::RosterFormatter;
use crate::commands::giveaway::models::Entrant;

pub struct DefaultRosterFormatter;

impl DefaultRosterFormatter {
    pub fn new() -> Self {
        DefaultRosterFormatter {}
    }
}

impl RosterFormatter for DefaultRosterFormatter {
    fn entry_line(&self, number: usize, entrant: &Entrant) -> String {
        format!("#{} - {} (id {})", number, entrant.label(), entrant.user_id)
    }

    fn winner_line(&self, number: usize, entrant: &Entrant) -> String {
        format!("{}. {} (id {})", number, entrant.label(), entrant.user_id)
    }
}

pub fn render_entries(formatter: &dyn RosterFormatter, entries: &[Entrant]) -> String {
    match entries.is_empty() {
        true => "Entries: (none)".to_string(),
        false => {
            let lines = entries
                .iter()
                .enumerate()
                .map(|(index, entrant)| formatter.entry_line(index + 1, entrant))
                .collect::<Vec<String>>();
            format!("Entries:\n{}", lines.join("\n"))
        }
    }
}

pub fn render_winners(formatter: &dyn RosterFormatter, winners: &[Entrant]) -> String {
    match winners.is_empty() {
        true => "Winners: (none)".to_string(),
        false => {
            let lines = winners
                .iter()
                .enumerate()
                .map(|(index, entrant)| formatter.winner_line(index + 1, entrant))
                .collect::<Vec<String>>();
            format!("Winners:\n{}", lines.join("\n"))
        }
    }
}
