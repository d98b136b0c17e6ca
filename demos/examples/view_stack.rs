// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View stacks and scoped interests.
//!
//! This example mirrors a small native hierarchy into a view tree, turns on
//! view stack resolution, and registers taps scoped to individual child views.
//! A tap on the avatar reaches the avatar and the card; a tap on the card's
//! decoration strip only reaches the card.
//!
//! Run:
//! - `cargo run -p understory_demos --example view_stack`

use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_gesture::adapters::view_tree::LogicalElement;
use understory_gesture::classifier::{Classifier, GestureListener};
use understory_gesture::command::{GestureCommand, RelayGesture};
use understory_gesture::container::{GestureConfig, GestureContainer};
use understory_gesture::types::{GestureInterest, GestureType};
use understory_view_tree::{LocalNode, NodeFlags, Tree};

#[derive(Clone, Debug)]
enum Element {
    View(&'static str),
    Chrome,
}

impl LogicalElement for Element {
    type View = &'static str;
    fn as_view(&self) -> Option<&'static str> {
        match self {
            Self::View(name) => Some(*name),
            Self::Chrome => None,
        }
    }
}

fn say(name: &'static str) -> Rc<dyn GestureCommand<&'static str, ()>> {
    Rc::new(RelayGesture::<&'static str, ()>::new(move |r, _| {
        println!(
            "  {name}: tapped, stack {:?}",
            r.view_stack().unwrap_or_default()
        );
    }))
}

fn main() {
    env_logger::init();

    let mut tree = Tree::new();
    let root = tree.insert(None, LocalNode::unmapped(Rect::new(0.0, 0.0, 360.0, 640.0)));
    let card = tree.insert(
        Some(root),
        LocalNode::element(Rect::new(20.0, 20.0, 340.0, 220.0), Element::View("card")),
    );
    tree.insert(
        Some(card),
        LocalNode::element(Rect::new(40.0, 40.0, 100.0, 100.0), Element::View("avatar")),
    );
    tree.insert(
        Some(card),
        LocalNode::element(Rect::new(20.0, 200.0, 340.0, 220.0), Element::Chrome),
    );
    let hidden = tree.insert(
        Some(root),
        LocalNode::element(Rect::new(0.0, 0.0, 360.0, 640.0), Element::View("overlay")),
    );
    tree.set_flags(hidden, NodeFlags::empty());

    let mut container: GestureContainer<&'static str> =
        GestureContainer::with_config(GestureConfig {
            exclude_children: true,
            ..GestureConfig::default()
        });
    let card_taps = GestureInterest::new(GestureType::SingleTap)
        .for_view("card")
        .with_command(say("card"));
    container.register_interests("card", vec![card_taps]);
    let avatar_taps = GestureInterest::new(GestureType::SingleTap)
        .for_view("avatar")
        .with_command(say("avatar"));
    container.register_interests("avatar", vec![avatar_taps]);

    for (label, pt) in [
        ("avatar", Point::new(60.0, 60.0)),
        ("decoration strip", Point::new(200.0, 210.0)),
        ("empty space", Point::new(200.0, 400.0)),
    ] {
        println!("== tap on {label} ==");
        let mut classifier = Classifier::new(&mut container, &tree, root);
        let handled = classifier.on_single_tap_confirmed(pt);
        println!("  handled natively: {handled}");
    }
}
