//! REST v2 URL layout.

/// Top-level REST collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Tasks,
    Projects,
    Sections,
    Comments,
    Labels,
}

impl Resource {
    /// URL path segment of the collection.
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Projects => "projects",
            Self::Sections => "sections",
            Self::Comments => "comments",
            Self::Labels => "labels",
        }
    }
}

/// Location of a remote operation relative to the API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/{resource}`
    Collection(Resource),
    /// `/{resource}/{id}`
    Item(Resource),
    /// `/{resource}/{id}/{action}`
    ItemAction(Resource, &'static str),
    /// Fixed segments with no identifier, e.g. `labels/shared/rename`.
    Fixed(&'static [&'static str]),
}

impl Endpoint {
    /// Whether the endpoint addresses a single resource by id.
    pub const fn needs_id(self) -> bool {
        matches!(self, Self::Item(_) | Self::ItemAction(..))
    }

    /// Name of the collection this endpoint belongs to.
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Collection(resource) | Self::Item(resource) | Self::ItemAction(resource, _) => {
                resource.segment()
            }
            Self::Fixed(segments) => segments.first().copied().unwrap_or_default(),
        }
    }

    /// Path segments below the base URL.
    ///
    /// Returns `None` when the endpoint needs an id and none was given. `.`
    /// and `..` do not count as ids since URL normalization drops them.
    pub fn segments<'a>(self, id: Option<&'a str>) -> Option<Vec<&'a str>> {
        let id = id.filter(|id| !matches!(*id, "." | ".."));
        match (self, id) {
            (Self::Collection(resource), _) => Some(vec![resource.segment()]),
            (Self::Item(resource), Some(id)) => Some(vec![resource.segment(), id]),
            (Self::ItemAction(resource, action), Some(id)) => {
                Some(vec![resource.segment(), id, action])
            }
            (Self::Fixed(segments), _) => Some(segments.to_vec()),
            (Self::Item(_) | Self::ItemAction(..), None) => None,
        }
    }
}
