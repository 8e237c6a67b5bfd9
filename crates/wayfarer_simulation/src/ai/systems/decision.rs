//! AI decision systems (валидация + решение на тик)

use bevy::prelude::*;

use crate::action::{ActionScheduler, AgentActions};
use crate::actor::{ControlDisabled, Health};
use crate::ai::{AIConfig, AIController, AlertShout, Behavior, PatrolPath, ThinkContext};
use crate::combat::{CombatTarget, Fighter};
use crate::error::SimulationError;
use crate::movement::{Mover, NavigationArea};
use crate::perception::{query_combat_targets, target_status, PerceptionRequest, SpatialIndex, TargetQuery};
use crate::player::Player;
use crate::shared::AnimationCues;
use crate::{log, log_error};

/// Система: новые AIController (Sense set)
///
/// - запоминаем home = текущая позиция
/// - без Mover контроллер отключается (ошибка в лог)
pub fn validate_ai_controllers(
    mut commands: Commands,
    mut controllers: Query<(Entity, &mut AIController, &Transform, Has<Mover>), Added<AIController>>,
) {
    for (entity, mut controller, transform, has_mover) in controllers.iter_mut() {
        controller.set_home(transform.translation);

        if has_mover {
            continue;
        }

        let error = SimulationError::MissingCollaborator {
            entity,
            component: "AIController",
            missing: "Mover".into(),
        };
        log_error(&format!("❌ {}", error));
        commands.entity(entity).insert(ControlDisabled {
            reason: error.to_string(),
        });
    }
}

/// Система: решение AI на тик (Decide set)
///
/// Perception - по SpatialIndex (snapshot начала тика), так что порядок
/// обработки агентов не влияет на то, кто кого видит.
pub fn ai_decision_tick(
    mut agents: Query<
        (
            Entity,
            &mut AIController,
            &AIConfig,
            &mut ActionScheduler,
            &mut Mover,
            Option<&mut Fighter>,
            Option<&mut PatrolPath>,
            &mut AnimationCues,
            &Transform,
            Option<&Health>,
            Option<&CombatTarget>,
        ),
        (Without<Player>, Without<ControlDisabled>),
    >,
    targets: TargetQuery,
    spatial: Res<SpatialIndex>,
    navigation: Res<NavigationArea>,
    mut shouts: EventWriter<AlertShout>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (
        entity,
        mut controller,
        config,
        mut scheduler,
        mut mover,
        mut fighter,
        mut patrol,
        mut cues,
        transform,
        health,
        combat_target,
    ) in agents.iter_mut()
    {
        let position = transform.translation;
        let sensor = |origin: Vec3, radius: f32| {
            let request = PerceptionRequest::new(origin, radius, config.target_faction).excluding(entity);
            query_combat_targets(spatial.as_ref(), &request, |candidate| target_status(&targets, candidate))
        };

        let previous = controller.last_behavior();
        let mut actions = AgentActions::new(&mut *scheduler, Some(&mut *mover), fighter.as_deref_mut(), &mut *cues);
        let behavior = controller.think(
            config,
            &mut actions,
            ThinkContext {
                position,
                is_dead: health.is_some_and(Health::is_dead),
                delta,
                sensor: &sensor,
                navigation: navigation.as_ref(),
                patrol: patrol.as_deref_mut(),
            },
        );

        if let Behavior::Attack { target } = behavior {
            shouts.write(AlertShout {
                source: entity,
                faction: combat_target.map(|combat_target| combat_target.faction),
                origin: position,
                radius: config.shout_radius,
                chase_extension: config.alert_chase_extension,
            });

            if !matches!(previous, Behavior::Attack { .. }) {
                log(&format!("⚔️ AI {:?} attacking {:?}", entity, target));
            }
        } else if std::mem::discriminant(&previous) != std::mem::discriminant(&behavior) {
            log(&format!("AI {:?}: {:?} → {:?}", entity, previous, behavior));
        }
    }
}
