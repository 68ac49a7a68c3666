//! The closed set of agent variants and their uniform per-turn contract.
//!
//! Everything the scheduler activates is an [`Agent`]: either a [`Dog`] or a
//! [`ParkObject`]. Dispatch on kind is a plain `match`.

use dogpark_types::{AgentKind, DisplayKind};
use serde::{Deserialize, Serialize};

use crate::dog::Dog;
use crate::park_object::{ObjectKind, ParkObject};

/// A scheduled agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Agent {
    /// A mobile dog.
    Dog(Dog),
    /// A stationary park object.
    Object(ParkObject),
}

impl Agent {
    /// The grid-level kind of this agent.
    pub const fn kind(&self) -> AgentKind {
        match self {
            Self::Dog(_) => AgentKind::Dog,
            Self::Object(object) => object.kind().agent_kind(),
        }
    }

    /// The dog inside, if this is a dog.
    pub const fn as_dog(&self) -> Option<&Dog> {
        match self {
            Self::Dog(dog) => Some(dog),
            Self::Object(_) => None,
        }
    }

    /// Mutable access to the dog inside, if this is a dog.
    pub const fn as_dog_mut(&mut self) -> Option<&mut Dog> {
        match self {
            Self::Dog(dog) => Some(dog),
            Self::Object(_) => None,
        }
    }

    /// The park object inside, if this is an object.
    pub const fn as_object(&self) -> Option<&ParkObject> {
        match self {
            Self::Dog(_) => None,
            Self::Object(object) => Some(object),
        }
    }

    /// Mutable access to the park object inside, if this is an object.
    pub const fn as_object_mut(&mut self) -> Option<&mut ParkObject> {
        match self {
            Self::Dog(_) => None,
            Self::Object(object) => Some(object),
        }
    }

    /// Whether this is a park object of the given kind.
    pub fn is_object_of(&self, kind: ObjectKind) -> bool {
        self.as_object().is_some_and(|o| o.kind() == kind)
    }

    /// How a renderer should draw this agent when it has a position.
    pub fn display(&self) -> DisplayKind {
        match self {
            Self::Dog(dog) => dog.display(),
            Self::Object(object) => object.display(),
        }
    }
}

impl From<Dog> for Agent {
    fn from(dog: Dog) -> Self {
        Self::Dog(dog)
    }
}

impl From<ParkObject> for Agent {
    fn from(object: ParkObject) -> Self {
        Self::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variant() {
        let dog: Agent = Dog::new("Dog_0".to_owned(), 10, "DogPic1.png".to_owned()).into();
        assert_eq!(dog.kind(), AgentKind::Dog);
        assert!(dog.as_dog().is_some());
        assert!(dog.as_object().is_none());

        let toy: Agent = ParkObject::new(ObjectKind::Toy).into();
        assert_eq!(toy.kind(), AgentKind::Toy);
        assert!(toy.is_object_of(ObjectKind::Toy));
        assert!(!toy.is_object_of(ObjectKind::Tree));
        assert_eq!(toy.display(), DisplayKind::Toy);
    }
}
