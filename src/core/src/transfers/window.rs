use crate::reference::TransferWindowRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    PreSeason,
    MidSeason,
}

#[derive(Debug, Clone, Copy)]
pub struct TransferWindow {
    rules: TransferWindowRules,
}

impl TransferWindow {
    pub fn new(rules: TransferWindowRules) -> Self {
        TransferWindow { rules }
    }

    pub fn kind(&self, round: u32) -> Option<WindowKind> {
        let within = |range: [u32; 2]| round >= range[0] && round <= range[1];

        if within(self.rules.pre_season) {
            Some(WindowKind::PreSeason)
        } else if within(self.rules.mid_season) {
            Some(WindowKind::MidSeason)
        } else {
            None
        }
    }

    pub fn is_open(&self, round: u32) -> bool {
        self.kind(round).is_some()
    }

    /// Last open round of a window. Bids placed here would only be answered
    /// after the window has shut.
    pub fn closes_at(&self, round: u32) -> bool {
        round == self.rules.pre_season[1] || round == self.rules.mid_season[1]
    }
}

impl Default for TransferWindow {
    fn default() -> Self {
        TransferWindow::new(TransferWindowRules::default())
    }
}
