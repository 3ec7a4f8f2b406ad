//! Combat state machine: action state, weapon state, death pose.
//!
//! Transitions are methods returning `bool`: `false` means the command was
//! not permitted in the current state and nothing changed (mash-proof controls).

use bevy::prelude::*;

use crate::RandomSource;

// ============================================================================
// Action State
// ============================================================================

/// Mutually exclusive action states.
///
/// ```text
/// Unoccupied ──attack──▶ Attacking ──AttackEnd──▶ Unoccupied
/// Unoccupied ──get hit─▶ HitReacting ──HitReactEnd──▶ Unoccupied
/// Unoccupied ──interact▶ Equipping ──EquipFinished──▶ Unoccupied
/// any (non-Dead) ──lethal damage──▶ Dead (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ActionState {
    #[default]
    Unoccupied,
    Attacking,
    HitReacting,
    /// Equip/unequip montage is playing; settles into `target` on finish.
    Equipping { target: CharacterState },
    Dead,
}

/// Weapon state of player-controlled combatants.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum CharacterState {
    #[default]
    Unequipped,
    EquippedOneHand,
    EquippedTwoHand,
}

impl CharacterState {
    pub fn is_equipped(&self) -> bool {
        !matches!(self, CharacterState::Unequipped)
    }
}

/// Death animation pose, chosen once at death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum DeathPose {
    #[default]
    None,
    Death1,
    Death2,
}

impl DeathPose {
    /// Poses available for random selection.
    pub const CHOICES: [DeathPose; 2] = [DeathPose::Death1, DeathPose::Death2];

    /// Uniform pick from [`DeathPose::CHOICES`].
    pub fn pick(rng: &mut impl RandomSource) -> Self {
        let index = rng.pick_index(Self::CHOICES.len());
        Self::CHOICES[index.min(Self::CHOICES.len() - 1)]
    }

    /// Montage section name (`None` has no section).
    pub fn section_name(&self) -> Option<&'static str> {
        match self {
            DeathPose::None => None,
            DeathPose::Death1 => Some("Death1"),
            DeathPose::Death2 => Some("Death2"),
        }
    }
}

// ============================================================================
// Combat State Component
// ============================================================================

/// Per-actor combat state.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub struct CombatState {
    pub action: ActionState,
    pub death_pose: DeathPose,
}

impl CombatState {
    pub fn is_dead(&self) -> bool {
        self.action == ActionState::Dead
    }

    pub fn is_unoccupied(&self) -> bool {
        self.action == ActionState::Unoccupied
    }

    /// Attack allowed: Unoccupied (implies alive) and, for player-controlled
    /// combatants, holding an equipped weapon.
    pub fn can_attack(&self, character: Option<&CharacterState>) -> bool {
        if !self.is_unoccupied() {
            return false;
        }
        character.map_or(true, CharacterState::is_equipped)
    }

    pub fn begin_attack(&mut self, character: Option<&CharacterState>) -> bool {
        if !self.can_attack(character) {
            return false;
        }
        self.action = ActionState::Attacking;
        true
    }

    pub fn end_attack(&mut self) -> bool {
        self.settle_from(ActionState::Attacking)
    }

    /// Get-hit while alive. A second hit during the reaction replays it.
    pub fn begin_hit_react(&mut self) -> bool {
        match self.action {
            ActionState::Unoccupied | ActionState::HitReacting => {
                self.action = ActionState::HitReacting;
                true
            }
            _ => false,
        }
    }

    pub fn end_hit_react(&mut self) -> bool {
        self.settle_from(ActionState::HitReacting)
    }

    pub fn begin_equip(&mut self, target: CharacterState) -> bool {
        if !self.is_unoccupied() {
            return false;
        }
        self.action = ActionState::Equipping { target };
        true
    }

    /// Equip montage finished: returns the character state to settle into.
    pub fn finish_equip(&mut self) -> Option<CharacterState> {
        let ActionState::Equipping { target } = self.action else {
            return None;
        };
        self.action = ActionState::Unoccupied;
        Some(target)
    }

    /// Enter Dead. Returns `false` if already dead (side effects run once).
    pub fn die(&mut self, pose: DeathPose) -> bool {
        if self.is_dead() {
            return false;
        }
        self.action = ActionState::Dead;
        self.death_pose = pose;
        true
    }

    fn settle_from(&mut self, expected: ActionState) -> bool {
        if self.action != expected {
            return false;
        }
        self.action = ActionState::Unoccupied;
        true
    }
}
