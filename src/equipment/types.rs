/// Attack/defense breakdown for a character screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsOverview {
    pub base_attack: u32,
    pub base_defense: u32,
    /// Equipment attack after enhancement.
    pub equipment_attack: u32,
    /// Equipment defense after enhancement.
    pub equipment_defense: u32,
}

impl StatsOverview {
    pub fn total_attack(&self) -> u32 {
        self.base_attack + self.equipment_attack
    }

    pub fn total_defense(&self) -> u32 {
        self.base_defense + self.equipment_defense
    }
}
