//! Collision-outcome notifications
//!
//! Controllers and the resolver never reach for a global application object;
//! they are handed the notification sink they need. [`GameEvents`] is that
//! seam, and [`EventQueue`] is the deferred implementation the frame driver
//! uses so gameplay reactions (detaching nodes, state transitions) happen
//! after the collision pass has finished borrowing the tree.

use crate::scene::NodeId;

/// A semantically meaningful outcome that crosses the component boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The player overlapped a pickup node; nothing was displaced
    Pickup(NodeId),
    /// The player hit something solid; terminal for the session
    FatalCollision,
    /// The fuel gauge ran dry; terminal for the session
    FuelDepleted,
}

/// Sink for collision outcomes
pub trait GameEvents {
    /// A pickup was consumed
    fn on_pickup(&mut self, node: NodeId);

    /// The player fatally collided
    fn on_fatal_collision(&mut self);
}

/// Recording sink that defers reactions to the end of the update pass
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Record an event directly
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all recorded events, leaving the queue empty
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GameEvents for EventQueue {
    fn on_pickup(&mut self, node: NodeId) {
        self.events.push(GameEvent::Pickup(node));
    }

    fn on_fatal_collision(&mut self) {
        self.events.push(GameEvent::FatalCollision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_records_in_order() {
        let mut queue = EventQueue::new();
        queue.on_fatal_collision();
        queue.push(GameEvent::FuelDepleted);

        assert_eq!(
            queue.drain(),
            vec![GameEvent::FatalCollision, GameEvent::FuelDepleted]
        );
        assert!(queue.is_empty());
    }
}
