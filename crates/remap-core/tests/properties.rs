//! Property tests for mapping and undo invariants.

use std::collections::BTreeSet;

use proptest::prelude::*;
use remap_core::{FileId, FileSession, HeaderSource, MappingController, MappingMessage};

#[derive(Debug, Clone)]
enum Gesture {
    /// Drag item `from` of one list onto item `to` of a list.
    Drop {
        drag_source: HeaderSource,
        from: usize,
        target_source: HeaderSource,
        to: usize,
    },
    Undo,
}

fn source() -> impl Strategy<Value = HeaderSource> {
    prop_oneof![Just(HeaderSource::Extra), Just(HeaderSource::Missing)]
}

fn gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        4 => (source(), 0usize..8, source(), 0usize..8).prop_map(
            |(drag_source, from, target_source, to)| Gesture::Drop {
                drag_source,
                from,
                target_source,
                to,
            }
        ),
        1 => Just(Gesture::Undo),
    ]
}

fn setup(extra: usize, missing: usize) -> (MappingController, FileId, BTreeSet<String>) {
    let id = FileId::new("p").unwrap();
    let extra: Vec<String> = (0..extra).map(|i| format!("e{i}")).collect();
    let missing: Vec<String> = (0..missing).map(|i| format!("m{i}")).collect();
    let all = extra.iter().chain(&missing).cloned().collect();
    let mut controller = MappingController::new();
    controller
        .register(FileSession::new(id.clone(), "p.xlsx", extra, missing).unwrap())
        .unwrap();
    (controller, id, all)
}

fn apply(controller: &mut MappingController, id: &FileId, gesture: &Gesture) {
    match gesture {
        Gesture::Drop {
            drag_source,
            from,
            target_source,
            to,
        } => {
            let session = controller.session(id).unwrap();
            let dragged = session.list(*drag_source).get(*from).cloned();
            let target = session.list(*target_source).get(*to).cloned();
            if let Some(header) = dragged {
                controller.update(MappingMessage::DragStarted {
                    file_id: id.clone(),
                    header,
                    source: *drag_source,
                });
            }
            if let Some(target) = target {
                controller.update(MappingMessage::Dropped {
                    file_id: id.clone(),
                    target,
                    target_source: *target_source,
                });
            }
            controller.update(MappingMessage::DragEnded);
        }
        Gesture::Undo => {
            controller.update(MappingMessage::UndoClicked(id.clone()));
        }
    }
}

fn placed_headers(controller: &MappingController, id: &FileId) -> Vec<String> {
    let session = controller.session(id).unwrap();
    session
        .extra()
        .iter()
        .chain(session.missing())
        .cloned()
        .chain(session.mapping().extra_headers().map(str::to_string))
        .chain(session.mapping().missing_headers().map(str::to_string))
        .collect()
}

proptest! {
    #[test]
    fn every_header_lives_in_exactly_one_place(
        extra in 0usize..6,
        missing in 0usize..6,
        gestures in prop::collection::vec(gesture(), 0..24),
    ) {
        let (mut controller, id, all) = setup(extra, missing);
        for g in &gestures {
            apply(&mut controller, &id, g);
            let placed = placed_headers(&controller, &id);
            let unique: BTreeSet<String> = placed.iter().cloned().collect();
            prop_assert_eq!(placed.len(), unique.len());
            prop_assert_eq!(&unique, &all);
        }
    }

    #[test]
    fn undo_visibility_tracks_history(
        gestures in prop::collection::vec(gesture(), 0..24),
    ) {
        let (mut controller, id, _) = setup(5, 5);
        for g in &gestures {
            apply(&mut controller, &id, g);
            let session = controller.session(&id).unwrap();
            let view = controller.view(&id).unwrap();
            prop_assert_eq!(view.undo_visible, session.history_len() > 0);
            prop_assert_eq!(session.history_len(), session.mapping().len());
        }
    }

    #[test]
    fn n_drops_then_n_undos_restore_initial_state(
        gestures in prop::collection::vec(gesture(), 0..24),
    ) {
        let (mut controller, id, _) = setup(6, 6);
        let before = controller.session(&id).unwrap().clone();
        for g in gestures.iter().filter(|g| matches!(g, Gesture::Drop { .. })) {
            apply(&mut controller, &id, g);
        }
        let steps = controller.session(&id).unwrap().history_len();
        for _ in 0..steps {
            controller.update(MappingMessage::UndoClicked(id.clone()));
        }
        let after = controller.session(&id).unwrap();
        prop_assert_eq!(after.extra(), before.extra());
        prop_assert_eq!(after.missing(), before.missing());
        prop_assert_eq!(after.mapping(), before.mapping());
        prop_assert!(!after.can_undo());
    }

    #[test]
    fn same_list_drops_never_mutate(
        from in 0usize..4,
        to in 0usize..4,
        side in source(),
    ) {
        let (mut controller, id, _) = setup(4, 4);
        let before = controller.session(&id).unwrap().clone();
        apply(&mut controller, &id, &Gesture::Drop {
            drag_source: side,
            from,
            target_source: side,
            to,
        });
        let after = controller.session(&id).unwrap();
        prop_assert_eq!(after.extra(), before.extra());
        prop_assert_eq!(after.missing(), before.missing());
        prop_assert!(after.mapping().is_empty());
        prop_assert_eq!(after.history_len(), 0);
    }
}
