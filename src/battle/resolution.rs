//! Battle resolution: turns the declared attacks and supports into fights
//!
//! Pipeline: group attacks by target -> enlist supporters -> order by lead
//! attacker strength -> fight each engagement -> loot -> close the phase.
//! The whole resolution undoes as one unit from a single snapshot.

use std::cmp::Reverse;
use std::fmt;

use crate::battle::combat::{
    distribute_casualties, sea_attrition, side_strength, BattleOutcome, Strength,
};
use crate::battle::grouping::{group_attacks, Engagement};
use crate::battle::loot::{plunder, Plunder};
use crate::battle::support::enlist_supporters;
use crate::command::args;
use crate::command::mutation::{Applied, Mutation};
use crate::command::undo::Backup;
use crate::core::error::ValidationError;
use crate::core::types::{Gold, Soldiers};
use crate::state::{BattlePhase, BondBook, GameState};

/// Everything a resolution may change, captured before it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleSnapshot {
    pub gold: Vec<Gold>,
    pub soldiers: Vec<Soldiers>,
    pub bonds: BondBook,
    pub battle: BattlePhase,
}

impl BattleSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            gold: state.gold.clone(),
            soldiers: state.soldiers.clone(),
            bonds: state.bonds.clone(),
            battle: state.battle.clone(),
        }
    }

    pub fn restore(self, state: &mut GameState) {
        state.gold = self.gold;
        state.soldiers = self.soldiers;
        state.bonds = self.bonds;
        state.battle = self.battle;
    }
}

/// What happened in one engagement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementReport {
    pub engagement: Engagement,
    pub sea_losses: Strength,
    pub attacker_losses: Vec<Soldiers>,
    pub defender_losses: Vec<Soldiers>,
    pub outcome: BattleOutcome,
    pub loot: Plunder,
}

impl fmt::Display for EngagementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attackers = join(&self.engagement.attackers);
        let defenders = join(&self.engagement.defenders);
        write!(f, "[{}] vs [{}]: ", attackers, defenders)?;
        match self.outcome {
            BattleOutcome::Retreat => write!(f, "attackers retreated"),
            BattleOutcome::Draw => write!(
                f,
                "draw, {} soldiers fell on each side",
                self.attacker_casualties()
            ),
            BattleOutcome::AttackerVictory | BattleOutcome::DefenderVictory => {
                let winner = if self.outcome == BattleOutcome::AttackerVictory {
                    "attackers"
                } else {
                    "defenders"
                };
                write!(
                    f,
                    "{} won, {} soldiers fell on each side, {} gold looted",
                    winner,
                    self.attacker_casualties(),
                    self.loot.pool
                )
            }
        }
    }
}

impl EngagementReport {
    /// Soldiers the attacking side lost in the fight, sea losses excluded
    pub fn attacker_casualties(&self) -> Strength {
        self.attacker_losses.iter().map(|&l| Strength::from(l)).sum()
    }
}

fn join(players: &[usize]) -> String {
    players
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// All engagements of one resolution, in the order they were fought
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleReport {
    pub engagements: Vec<EngagementReport>,
}

impl BattleReport {
    pub fn summary(&self) -> String {
        if self.engagements.is_empty() {
            return "The battle ended without any fighting".to_string();
        }
        let lines: Vec<String> = self.engagements.iter().map(|e| e.to_string()).collect();
        format!(
            "Resolved {} engagement(s): {}",
            self.engagements.len(),
            lines.join("; ")
        )
    }
}

/// Build the engagements for the current declarations, sorted by the
/// soldiers of their lead attacker (strongest first, stable on ties)
pub fn plan_engagements(state: &GameState) -> Vec<Engagement> {
    let mut engagements = group_attacks(&state.battle.attacks, &state.map);
    enlist_supporters(
        &mut engagements,
        &state.battle.supports,
        state.player_count(),
    );
    engagements.sort_by_key(|e| Reverse(state.soldiers_of(e.lead_attacker())));
    engagements
}

/// Fight one engagement against the current soldier counts
pub fn fight(state: &mut GameState, engagement: Engagement, before: &BattleSnapshot) -> EngagementReport {
    let mut sea_losses = 0;
    if !state
        .map
        .linked(engagement.primary_defender(), engagement.lead_attacker())
    {
        sea_losses = sea_attrition(
            &mut state.soldiers,
            &engagement.attackers,
            state.water_die_percentage,
        );
        tracing::info!(
            "Attackers on {} lost {} soldiers at sea",
            engagement.primary_defender(),
            sea_losses
        );
    }

    let attack = side_strength(&state.soldiers, &engagement.attackers);
    if attack == 0 {
        tracing::info!(
            "Attackers on {} have nobody left and retreat",
            engagement.primary_defender()
        );
        return EngagementReport {
            attacker_losses: vec![0; engagement.attackers.len()],
            defender_losses: vec![0; engagement.defenders.len()],
            engagement,
            sea_losses,
            outcome: BattleOutcome::Retreat,
            loot: Plunder::default(),
        };
    }

    let defence = side_strength(&state.soldiers, &engagement.defenders);
    let casualties = attack.min(defence);
    let attacker_losses = distribute_casualties(&mut state.soldiers, &engagement.attackers, casualties);
    let defender_losses = distribute_casualties(&mut state.soldiers, &engagement.defenders, casualties);

    let outcome = BattleOutcome::decide(attack, defence);
    let loot = match outcome {
        BattleOutcome::AttackerVictory => plunder(
            state,
            before,
            &engagement.defenders,
            &engagement.attackers,
        ),
        BattleOutcome::DefenderVictory => plunder(
            state,
            before,
            &engagement.attackers,
            &engagement.defenders,
        ),
        BattleOutcome::Draw | BattleOutcome::Retreat => Plunder::default(),
    };

    tracing::debug!(
        "Engagement on {}: {} vs {} soldiers, {:?}, pool {}",
        engagement.primary_defender(),
        attack,
        defence,
        outcome,
        loot.pool
    );

    EngagementReport {
        engagement,
        sea_losses,
        attacker_losses,
        defender_losses,
        outcome,
        loot,
    }
}

/// Run every engagement and close the battle phase
pub fn resolve(state: &mut GameState, before: &BattleSnapshot) -> BattleReport {
    let engagements = plan_engagements(state);
    let mut report = BattleReport::default();
    for engagement in engagements {
        report.engagements.push(fight(state, engagement, before));
    }
    state.battle.close();
    report
}

/// `resolve-battle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveBattle;

impl ResolveBattle {
    pub fn parse(raw: &[&str]) -> Result<Self, ValidationError> {
        args::arity(raw, 0, 0, "no")?;
        Ok(Self)
    }
}

impl Mutation for ResolveBattle {
    fn validate(&self, state: &GameState) -> Result<(), ValidationError> {
        if !state.battle.in_battle {
            return Err(ValidationError::BattleNotOpen);
        }
        Ok(())
    }

    fn run(&self, state: &mut GameState) -> Applied {
        let snapshot = BattleSnapshot::capture(state);
        let report = resolve(state, &snapshot);
        tracing::info!("Battle resolved with {} engagement(s)", report.engagements.len());
        Applied::new(Backup::BattleResolved(Box::new(snapshot)), report.summary())
    }
}
