//! Terrain and object collision passes

use super::{Contact, EntityContext, Object, Services, World};
use crate::config::SimulationConfig;
use crate::foundation::collections::ObjectId;
use crate::input::NoInput;
use crate::physics::{check_collision, resolve_against_static, resolve_dynamic_pair, resolve_terrain};
use crate::terrain::Map;

/// Borrowed world state handed to collision hooks
struct Hooks<'a> {
    services: &'a mut Services,
    map: &'a Map,
    config: &'a SimulationConfig,
    delivered: &'a mut Vec<(ObjectId, Contact)>,
}

impl Hooks<'_> {
    fn dispatch(&mut self, object: &mut Object, contact: &Contact) {
        let Some(id) = object.id() else {
            return;
        };
        let mut ctx = EntityContext {
            id,
            services: &mut *self.services,
            input: &NoInput,
            map: self.map,
            config: self.config,
        };
        object.kind.behavior_mut().on_collision(&mut object.body, contact, &mut ctx);
        self.delivered.push((id, *contact));
    }
}

impl World {
    /// Lift dynamic objects out of the terrain.
    ///
    /// Returns the number of objects that touched the ground.
    pub fn process_map_collision(&mut self) -> usize {
        let mut grounded = 0;
        for &id in &self.dynamic_objects {
            let Some(body) = self.objects.get_mut(id).and_then(|object| object.body.as_dynamic_mut()) else {
                continue;
            };
            let (position, velocity, colliders) = body.split_mut();
            if resolve_terrain(&self.map, position, velocity, colliders) {
                grounded += 1;
            }
        }
        grounded
    }

    /// Separate overlapping objects and notify both sides.
    ///
    /// Dynamic objects are first tested against every static object, then
    /// against each other. Returns the number of collider pairs resolved;
    /// the delivered callbacks are kept until the next pass, see
    /// [`World::contacts`].
    pub fn process_object_collision(&mut self) -> usize {
        self.contacts.clear();
        let mut hooks = Hooks {
            services: &mut self.services,
            map: &self.map,
            config: &self.config,
            delivered: &mut self.contacts,
        };
        let mut contacts = 0;

        for &d in &self.dynamic_objects {
            for &s in &self.static_objects {
                if s == d {
                    continue;
                }
                let Some([dynamic, fixed]) = self.objects.get_disjoint_mut([d, s]) else {
                    continue;
                };
                // Dynamic objects only collide in their dynamic role
                if fixed.body.is_dynamic() {
                    continue;
                }
                contacts += collide_with_static(dynamic, fixed, &mut hooks);
            }
        }

        for (i, &a) in self.dynamic_objects.iter().enumerate() {
            for &b in &self.dynamic_objects[i + 1..] {
                let Some([first, second]) = self.objects.get_disjoint_mut([a, b]) else {
                    continue;
                };
                contacts += collide_dynamic_pair(first, second, &mut hooks);
            }
        }

        contacts
    }
}

/// Push `dynamic` out of `fixed` collider by collider
fn collide_with_static(dynamic: &mut Object, fixed: &mut Object, hooks: &mut Hooks<'_>) -> usize {
    let (Some(dynamic_id), Some(fixed_id)) = (dynamic.id(), fixed.id()) else {
        return 0;
    };
    let mut contacts = 0;

    for i in 0..dynamic.body.colliders().len() {
        for j in 0..fixed.body.colliders().len() {
            let (Some(dynamic_pos), Some(fixed_pos)) = (dynamic.body.position(), fixed.body.position()) else {
                return contacts;
            };
            let mine = dynamic.body.colliders()[i];
            let theirs = fixed.body.colliders()[j];

            let Some(mtv) = check_collision(theirs.at(fixed_pos), mine.at(dynamic_pos)).contact() else {
                continue;
            };
            let Some(body) = dynamic.body.as_dynamic_mut() else {
                return contacts;
            };
            let (position, velocity, _) = body.split_mut();
            let resolution = resolve_against_static(position, velocity, mtv);
            log::trace!(
                "{} {:?} pushed out of {} {:?} by {} on {:?}",
                dynamic.kind.tag(),
                dynamic_id,
                fixed.kind.tag(),
                fixed_id,
                resolution.displacement,
                resolution.axis
            );

            hooks.dispatch(
                dynamic,
                &Contact {
                    my_collider: mine.id(),
                    other_collider: theirs.id(),
                    other: fixed_id,
                    other_tag: fixed.tag(),
                    mtv,
                },
            );
            hooks.dispatch(
                fixed,
                &Contact {
                    my_collider: theirs.id(),
                    other_collider: mine.id(),
                    other: dynamic_id,
                    other_tag: dynamic.tag(),
                    mtv: -mtv,
                },
            );
            contacts += 1;
        }
    }

    contacts
}

/// Split the separation between two dynamic objects
fn collide_dynamic_pair(a: &mut Object, b: &mut Object, hooks: &mut Hooks<'_>) -> usize {
    let (Some(a_id), Some(b_id)) = (a.id(), b.id()) else {
        return 0;
    };
    let mut contacts = 0;

    for i in 0..a.body.colliders().len() {
        for j in 0..b.body.colliders().len() {
            let (Some(a_body), Some(b_body)) = (a.body.as_dynamic_mut(), b.body.as_dynamic_mut()) else {
                return contacts;
            };
            let first = a_body.colliders[i];
            let second = b_body.colliders[j];

            // Displacement that moves b out of a
            let Some(mtv) = check_collision(first.at(a_body.position), second.at(b_body.position)).contact() else {
                continue;
            };
            let resolution = resolve_dynamic_pair(&mut a_body.position, &mut b_body.position, mtv);
            log::trace!(
                "{:?} and {:?} separated by {} on {:?}",
                a_id,
                b_id,
                resolution.displacement,
                resolution.axis
            );

            hooks.dispatch(
                a,
                &Contact {
                    my_collider: first.id(),
                    other_collider: second.id(),
                    other: b_id,
                    other_tag: b.tag(),
                    mtv: -mtv,
                },
            );
            hooks.dispatch(
                b,
                &Contact {
                    my_collider: second.id(),
                    other_collider: first.id(),
                    other: a_id,
                    other_tag: a.tag(),
                    mtv,
                },
            );
            contacts += 1;
        }
    }

    contacts
}
