//! Attachment компоненты: визуальный инстанс оружия в руке агента

use bevy::prelude::*;

use crate::combat::{Hand, WeaponId};

/// Attachment - привязка prefab'а оружия к точке на модели агента
///
/// Живёт как child entity владельца (`ChildOf`). При смене оружия старый
/// инстанс despawn'ится до появления нового - в руке максимум один.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Attachment {
    /// Путь к prefab (например "res://weapons/sword.tscn")
    pub prefab_path: String,

    /// Attachment point на host prefab (например "RightHand/WeaponAttachment")
    pub attachment_point: String,

    /// Какое оружие представляет инстанс
    pub weapon: WeaponId,
}

impl Attachment {
    /// Создать attachment для weapon
    pub fn weapon(weapon: WeaponId, prefab_path: impl Into<String>, hand: Hand) -> Self {
        Self {
            prefab_path: prefab_path.into(),
            attachment_point: hand.attachment_point().into(),
            weapon,
        }
    }
}

impl Hand {
    pub fn attachment_point(self) -> &'static str {
        match self {
            Hand::Right => "RightHand/WeaponAttachment",
            Hand::Left => "LeftHand/WeaponAttachment",
        }
    }
}
