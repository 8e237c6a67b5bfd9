//! PatrolPath - упорядоченные waypoints + курсор агента.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PatrolDirection {
    #[default]
    Forward,
    Backward,
}

impl PatrolDirection {
    fn reversed(self) -> Self {
        match self {
            PatrolDirection::Forward => PatrolDirection::Backward,
            PatrolDirection::Backward => PatrolDirection::Forward,
        }
    }
}

/// Маршрут патруля
///
/// - looping: после последнего waypoint'а - снова первый
/// - иначе ping-pong: на конце маршрута разворот
///
/// Пустой маршрут валиден - `waypoint_or` отдаёт fallback (home).
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PatrolPath {
    waypoints: Vec<Vec3>,
    pub looping: bool,
    index: usize,
    direction: PatrolDirection,
}

impl PatrolPath {
    pub fn new(waypoints: Vec<Vec3>, looping: bool) -> Self {
        Self {
            waypoints,
            looping,
            index: 0,
            direction: PatrolDirection::Forward,
        }
    }

    pub fn looping(waypoints: Vec<Vec3>) -> Self {
        Self::new(waypoints, true)
    }

    pub fn ping_pong(waypoints: Vec<Vec3>) -> Self {
        Self::new(waypoints, false)
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> PatrolDirection {
        self.direction
    }

    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.index).copied()
    }

    pub fn waypoint_or(&self, fallback: Vec3) -> Vec3 {
        self.current_waypoint().unwrap_or(fallback)
    }

    /// Перейти к следующему waypoint'у
    pub fn next_index(&mut self) {
        let len = self.waypoints.len();
        if len < 2 {
            self.index = 0;
            return;
        }

        let last = len - 1;
        self.index = match (self.direction, self.index) {
            (PatrolDirection::Forward, index) if index < last => index + 1,
            (PatrolDirection::Backward, index) if index > 0 => index - 1,
            // Конец маршрута
            (PatrolDirection::Forward, _) if self.looping => 0,
            (PatrolDirection::Backward, _) if self.looping => last,
            (direction, index) => {
                self.direction = direction.reversed();
                match self.direction {
                    PatrolDirection::Forward => index + 1,
                    PatrolDirection::Backward => index - 1,
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_points() -> Vec<Vec3> {
        vec![Vec3::ZERO, Vec3::X, Vec3::Z]
    }

    fn visit(path: &mut PatrolPath, steps: usize) -> Vec<usize> {
        (0..steps)
            .map(|_| {
                path.next_index();
                path.current_index()
            })
            .collect()
    }

    #[test]
    fn test_looping_wraps_to_start() {
        let mut path = PatrolPath::looping(three_points());
        assert_eq!(visit(&mut path, 5), vec![1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_ping_pong_reverses_at_ends() {
        let mut path = PatrolPath::ping_pong(three_points());
        assert_eq!(visit(&mut path, 6), vec![1, 2, 1, 0, 1, 2]);
    }

    #[test]
    fn test_degenerate_paths() {
        let mut empty = PatrolPath::looping(Vec::new());
        empty.next_index();
        assert_eq!(empty.waypoint_or(Vec3::ONE), Vec3::ONE);

        let mut single = PatrolPath::ping_pong(vec![Vec3::X]);
        assert_eq!(visit(&mut single, 3), vec![0, 0, 0]);
        assert_eq!(single.waypoint_or(Vec3::ONE), Vec3::X);
    }
}
