//! Player command systems

use bevy::prelude::*;

use super::player::{Player, PlayerCommand, PlayerIntent};
use crate::action::{ActionScheduler, AgentActions};
use crate::actor::{ControlDisabled, Health};
use crate::combat::Fighter;
use crate::equipment::EquipWeaponRequest;
use crate::error::SimulationError;
use crate::movement::{Mover, NavigationArea};
use crate::perception::{target_view, SpatialIndex, TargetQuery};
use crate::shared::AnimationCues;
use crate::{log, log_error};

/// Система: Player без Mover отключается (Sense set)
pub fn validate_players(
    mut commands: Commands,
    players: Query<(Entity, Has<Mover>), (Added<Player>, Without<ControlDisabled>)>,
) {
    for (entity, has_mover) in players.iter() {
        if has_mover {
            continue;
        }

        let error = SimulationError::MissingCollaborator {
            entity,
            component: "Player",
            missing: "Mover".into(),
        };
        log_error(&format!("❌ {}", error));
        commands.entity(entity).insert(ControlDisabled {
            reason: error.to_string(),
        });
    }
}

/// Система: PlayerCommand → действия (Decide set)
///
/// Мёртвый игрок команды игнорирует. Equip уходит в EquipWeaponRequest.
pub fn handle_player_commands(
    mut player_commands: EventReader<PlayerCommand>,
    mut players: Query<
        (
            &mut ActionScheduler,
            &mut Mover,
            Option<&mut Fighter>,
            &mut AnimationCues,
            &Transform,
            Option<&Health>,
        ),
        (With<Player>, Without<ControlDisabled>),
    >,
    targets: TargetQuery,
    spatial: Res<SpatialIndex>,
    navigation: Res<NavigationArea>,
    mut equip_requests: EventWriter<EquipWeaponRequest>,
) {
    for command in player_commands.read() {
        let Ok((mut scheduler, mut mover, mut fighter, mut cues, transform, health)) = players.get_mut(command.actor)
        else {
            continue;
        };
        if health.is_some_and(Health::is_dead) {
            continue;
        }

        let origin = transform.translation;
        let mut actions = AgentActions::new(&mut *scheduler, Some(&mut *mover), fighter.as_deref_mut(), &mut *cues);

        match &command.intent {
            PlayerIntent::Attack(target) => {
                let Some(view) = target_view(&targets, &spatial, *target) else {
                    log(&format!("Player {:?}: {:?} is not a combat target", command.actor, target));
                    continue;
                };
                if actions.can_attack(&view, origin, navigation.as_ref()) {
                    actions.attack(&view);
                } else {
                    log(&format!("Player {:?}: cannot attack {:?}", command.actor, target));
                }
            }
            PlayerIntent::MoveTo(destination) => {
                actions.start_move_action(origin, *destination, navigation.as_ref());
            }
            PlayerIntent::Equip(weapon) => {
                equip_requests.write(EquipWeaponRequest {
                    entity: command.actor,
                    weapon: Some(weapon.clone()),
                });
            }
            PlayerIntent::Stop => actions.cancel_current_action(),
        }
    }
}
