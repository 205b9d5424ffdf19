//! Capacity-bounded room graph construction: random room sizes, biased link
//! matching, and pruning of rooms that never got a link.

use crate::rng::RangeRng;

use super::model::Room;

/// Draws `room_count` rooms with sides in `[min_side, max_side]` and a link
/// capacity in `[1, 4]`, then links them in id order. Rooms that end up with
/// no links are pruned, so every returned room has at least one partner.
pub(super) fn build_room_graph(
    rng: &mut dyn RangeRng,
    room_count: usize,
    min_side: i32,
    max_side: i32,
) -> Vec<Room> {
    let mut rooms: Vec<Room> = (0..room_count)
        .map(|id| Room {
            id,
            width: rng.range(min_side, max_side),
            height: rng.range(min_side, max_side),
            max_links: rng.range(1, 4) as usize,
            linked_to: Vec::new(),
            layout_coord: None,
        })
        .collect();

    for index in 0..rooms.len() {
        let remaining = rooms[index].max_links.saturating_sub(rooms[index].linked_to.len());
        for _ in 0..remaining {
            let Some(partner) = find_linkable_partner(rng, &rooms, index) else {
                break;
            };
            let partner_id = rooms[partner].id;
            let current_id = rooms[index].id;
            rooms[index].linked_to.push(partner_id);
            rooms[partner].linked_to.push(current_id);
        }
    }

    rooms.retain(|room| !room.linked_to.is_empty());
    rooms
}

/// One scan over all rooms. Remembers the first eligible room as a fallback
/// and, per scan step, draws one random index that is returned immediately on
/// an eligible hit. The random hit dominates, so links skew toward sampled
/// partners while the fallback still guarantees progress whenever any
/// eligible partner exists.
fn find_linkable_partner(
    rng: &mut dyn RangeRng,
    rooms: &[Room],
    current: usize,
) -> Option<usize> {
    let mut fallback = None;

    for scanned in 0..rooms.len() {
        if fallback.is_none() && can_link(rooms, current, scanned) {
            fallback = Some(scanned);
        }

        let sampled = rng.range(0, rooms.len() as i32 - 1) as usize;
        if can_link(rooms, current, sampled) {
            return Some(sampled);
        }
    }

    fallback
}

fn can_link(rooms: &[Room], current: usize, candidate: usize) -> bool {
    candidate != current
        && rooms[candidate].linked_to.len() < rooms[candidate].max_links
        && !rooms[current].linked_to.contains(&rooms[candidate].id)
}
