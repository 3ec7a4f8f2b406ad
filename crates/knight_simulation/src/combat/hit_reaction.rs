//! Directional hit reaction: impact point → секция hit-react montage
//!
//! Геометрия в горизонтальной плоскости актора:
//! 1. Impact point опускается на высоту актора (склоны не влияют)
//! 2. theta = angle(forward, to_hit) в градусах, [0°, 180°]
//! 3. Знак theta по вертикальной компоненте forward × to_hit
//! 4. Классификация по полуоткрытым интервалам
//!
//! ```text
//!              FromFront
//!             [-45°, 45°)
//!  FromLeft                 FromRight
//! [-135°,-45°)             [45°, 135°)
//!               FromBack
//!        [135°, 180°] ∪ (-180°, -135°)
//! ```

use bevy::prelude::*;

use crate::components::WORLD_UP;

/// Категория реакции на удар (совпадает с именем секции montage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum HitReaction {
    FromFront,
    FromBack,
    FromLeft,
    FromRight,
}

impl HitReaction {
    pub fn section_name(&self) -> &'static str {
        match self {
            HitReaction::FromFront => "FromFront",
            HitReaction::FromBack => "FromBack",
            HitReaction::FromLeft => "FromLeft",
            HitReaction::FromRight => "FromRight",
        }
    }

    /// Классификация signed угла (градусы, (-180, 180])
    pub fn from_signed_angle(theta: f32) -> Self {
        if (-45.0..45.0).contains(&theta) {
            HitReaction::FromFront
        } else if (-135.0..-45.0).contains(&theta) {
            HitReaction::FromLeft
        } else if (45.0..135.0).contains(&theta) {
            HitReaction::FromRight
        } else {
            HitReaction::FromBack
        }
    }
}

/// Signed угол между forward и направлением на impact (градусы)
///
/// `None` если вектор до impact (после проекции) или forward нулевой.
pub fn signed_hit_angle(forward: Vec3, position: Vec3, impact_point: Vec3) -> Option<f32> {
    // Опускаем impact point на высоту актора
    let offset = impact_point - position;
    let lowered = offset - WORLD_UP * offset.dot(WORLD_UP);

    let to_hit = lowered.try_normalize()?;
    let forward = forward.try_normalize()?;

    let cos_theta = forward.dot(to_hit).clamp(-1.0, 1.0);
    let mut theta = cos_theta.acos().to_degrees();

    // Cross product смотрит вниз → удар слева, theta отрицательный
    let cross = forward.cross(to_hit);
    if cross.dot(WORLD_UP) < 0.0 {
        theta = -theta;
    }

    Some(theta)
}

/// Resolver: (forward, позиция актора, impact point) → HitReaction
///
/// Pure function. Вырожденная геометрия (impact в позиции актора) → FromFront.
pub fn resolve_hit_reaction(forward: Vec3, position: Vec3, impact_point: Vec3) -> HitReaction {
    match signed_hit_angle(forward, position, impact_point) {
        Some(theta) => HitReaction::from_signed_angle(theta),
        None => HitReaction::FromFront,
    }
}
