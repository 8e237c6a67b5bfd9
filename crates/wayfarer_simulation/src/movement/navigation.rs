//! Navigation collaborator: достижимость точки и длина пути.

use bevy::prelude::*;

/// Backend навигации (navmesh host-движка, тестовая арена, открытое поле)
pub trait NavigationBackend: Send + Sync {
    /// Длина пути from → to. None если точка недостижима.
    fn path_length(&self, from: Vec3, to: Vec3) -> Option<f32>;

    fn is_reachable(&self, from: Vec3, to: Vec3) -> bool {
        self.path_length(from, to).is_some()
    }
}

/// Простая навигационная область на плоскости XZ
///
/// - walkable пустой → всё поле проходимо
/// - obstacle → точки внутри недостижимы
///
/// Длина пути = прямая (обход препятствий не моделируется).
#[derive(Resource, Debug, Clone, Default)]
pub struct NavigationArea {
    walkable: Vec<Rect>,
    obstacles: Vec<Rect>,
}

impl NavigationArea {
    pub fn with_walkable(mut self, region: Rect) -> Self {
        self.walkable.push(region);
        self
    }

    pub fn with_obstacle(mut self, region: Rect) -> Self {
        self.obstacles.push(region);
        self
    }

    pub fn is_walkable(&self, point: Vec3) -> bool {
        let flat = Vec2::new(point.x, point.z);
        let inside_walkable = self.walkable.is_empty() || self.walkable.iter().any(|rect| rect.contains(flat));
        inside_walkable && !self.obstacles.iter().any(|rect| rect.contains(flat))
    }
}

impl NavigationBackend for NavigationArea {
    fn path_length(&self, from: Vec3, to: Vec3) -> Option<f32> {
        self.is_walkable(to).then(|| from.distance(to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_ground_is_straight_line() {
        let area = NavigationArea::default();
        assert_eq!(area.path_length(Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0)), Some(5.0));
    }

    #[test]
    fn test_walkable_and_obstacles() {
        let area = NavigationArea::default()
            .with_walkable(Rect::new(-10.0, -10.0, 10.0, 10.0))
            .with_obstacle(Rect::new(2.0, 2.0, 4.0, 4.0));

        assert!(area.is_reachable(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0)));
        // Внутри препятствия (XZ: x=3, z=3)
        assert!(!area.is_reachable(Vec3::ZERO, Vec3::new(3.0, 0.0, 3.0)));
        // За пределами walkable
        assert!(!area.is_reachable(Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0)));
    }
}
