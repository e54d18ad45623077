use crate::config::{ActivePolicy, Hitbox};
use crate::engine::Rect;

// feet box: middle half of the width, bottom quarter of the height
const FEET_WIDTH: f32 = 0.5;
const FEET_HEIGHT: f32 = 0.25;

/// The part of `body` that touches objects
pub fn hitbox(body: Rect, kind: Hitbox) -> Rect {
    match kind {
        Hitbox::Full => body,
        Hitbox::Feet => {
            let width = body.size.width * FEET_WIDTH;
            let height = body.size.height * FEET_HEIGHT;
            Rect::from_xywh(
                body.center().x - width / 2.0,
                body.bottom() - height,
                width,
                height,
            )
        }
    }
}

/// Index of the object box that `hitbox` activates, if any overlaps it
pub fn find_active<I>(hitbox: &Rect, boxes: I, policy: ActivePolicy) -> Option<usize>
where
    I: IntoIterator<Item = Rect>,
{
    let overlapping = boxes
        .into_iter()
        .enumerate()
        .filter(|(_, object)| hitbox.intersects(object));

    match policy {
        ActivePolicy::Last => overlapping.map(|(index, _)| index).last(),
        ActivePolicy::Nearest => {
            let center = hitbox.center();
            let mut best: Option<(usize, f32)> = None;
            for (index, object) in overlapping {
                let distance = center.distance_to(object.center());
                // strictly closer, so the earlier object keeps a tie
                if best.map_or(true, |(_, closest)| distance < closest) {
                    best = Some((index, distance));
                }
            }
            best.map(|(index, _)| index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Point, Size};

    #[test]
    fn feet_box_sits_at_the_bottom_middle() {
        let body = Rect::from_center(Point::new(100.0, 100.0), Size::new(40.0, 80.0));
        let feet = hitbox(body, Hitbox::Feet);
        assert_eq!(feet, Rect::from_xywh(90.0, 120.0, 20.0, 20.0));
        assert_eq!(hitbox(body, Hitbox::Full), body);
    }

    #[test]
    fn nothing_overlapping_is_none() {
        let character = Rect::from_xywh(0.0, 0.0, 30.0, 30.0);
        let boxes = vec![
            Rect::from_xywh(30.0, 0.0, 50.0, 50.0),
            Rect::from_xywh(200.0, 200.0, 50.0, 50.0),
        ];
        assert_eq!(find_active(&character, boxes.clone(), ActivePolicy::Nearest), None);
        assert_eq!(find_active(&character, boxes, ActivePolicy::Last), None);
    }

    #[test]
    fn policies_differ_when_several_overlap() {
        let character = Rect::from_xywh(40.0, 40.0, 30.0, 30.0);
        let boxes = vec![
            // center (55, 55): same as the character
            Rect::from_xywh(30.0, 30.0, 50.0, 50.0),
            // center (85, 85): further away
            Rect::from_xywh(60.0, 60.0, 50.0, 50.0),
        ];
        assert_eq!(find_active(&character, boxes.clone(), ActivePolicy::Nearest), Some(0));
        assert_eq!(find_active(&character, boxes, ActivePolicy::Last), Some(1));
    }

    #[test]
    fn nearest_tie_keeps_the_earlier_object() {
        let character = Rect::from_xywh(45.0, 0.0, 10.0, 10.0);
        let boxes = vec![
            Rect::from_xywh(0.0, 0.0, 50.0, 10.0),
            Rect::from_xywh(50.0, 0.0, 50.0, 10.0),
        ];
        assert_eq!(find_active(&character, boxes, ActivePolicy::Nearest), Some(0));
    }
}
