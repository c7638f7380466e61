//! Gateway operation table.
//!
//! Every endpoint is one `Operation` descriptor. The generic dispatcher reads
//! the descriptor to extract input, make the single remote call and shape the
//! reply, so adding an endpoint means adding a row here.

use reqwest::Method;

use crate::todoist::{Endpoint, Resource};

/// Inbound query parameter and the remote name it is forwarded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub remote: &'static str,
}

/// Presence rule for body fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Required {
    Nothing,
    /// Every field must be present.
    All(&'static [&'static str]),
    /// At least one field must be present.
    Any(&'static [&'static str]),
}

/// Where an operation takes its parameters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// No parameters.
    None,
    /// Optional query filters, forwarded when non-empty.
    Filters(&'static [Param]),
    /// Optional scope; without it the reply is an empty list and no remote
    /// call is made.
    Scope(Param),
    /// The first present parameter is forwarded alone; none present is a 400.
    OneOf(&'static [Param]),
    /// Forwarded as `remote=true` only when the value is exactly `true`.
    Flag(Param),
    /// Mandatory query parameter naming the remote resource.
    Id(&'static str),
    /// JSON object body, optionally restricted to a field whitelist.
    Body {
        fields: Option<&'static [&'static str]>,
        required: Required,
    },
    /// JSON object body; the named field is split off as the resource id and
    /// the rest is the update payload.
    BodyWithId(&'static str),
}

impl Input {
    /// Query parameters with their required flag.
    pub fn query_params(self) -> Vec<(&'static str, bool)> {
        match self {
            Self::Filters(params) | Self::OneOf(params) => {
                params.iter().map(|p| (p.name, false)).collect()
            }
            Self::Scope(p) | Self::Flag(p) => vec![(p.name, false)],
            Self::Id(name) => vec![(name, true)],
            Self::None | Self::Body { .. } | Self::BodyWithId(_) => Vec::new(),
        }
    }

    pub const fn takes_body(self) -> bool {
        matches!(self, Self::Body { .. } | Self::BodyWithId(_))
    }

    /// Name of the identifier parameter, if the input carries one.
    pub const fn identifier(self) -> Option<&'static str> {
        match self {
            Self::Id(name) | Self::BodyWithId(name) => Some(name),
            _ => None,
        }
    }

    /// Whether some inputs are rejected with 400.
    pub const fn can_reject(self) -> bool {
        matches!(
            self,
            Self::OneOf(_) | Self::Id(_) | Self::Body { .. } | Self::BodyWithId(_)
        )
    }
}

/// How the remote reply becomes the value under the response key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Remote JSON with camelCase keys; `true` when the remote body is empty.
    Resource,
    /// Remote JSON as received.
    Raw,
    /// `true` once the remote call succeeded.
    Acknowledge,
}

/// HTTP method of the remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Delete => Method::DELETE,
        }
    }
}

/// One gateway endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Exact, case-sensitive inbound path.
    pub path: &'static str,
    pub summary: &'static str,
    pub input: Input,
    pub verb: Verb,
    pub endpoint: Endpoint,
    pub reply: Reply,
    /// Key wrapping the reply value in the JSON response.
    pub key: &'static str,
    /// Message returned with 500 when the remote call fails.
    pub failure: &'static str,
}

impl Operation {
    /// Reads are documented as GET, everything else as POST.
    pub fn is_read(&self) -> bool {
        self.verb == Verb::Get
    }
}

/// Build an `Operation` row.
///
/// `op!(path, summary, input, VERB endpoint => REPLY key, failure)`
macro_rules! op {
    (
        $path:literal, $summary:literal, $input:expr,
        $verb:ident $endpoint:expr => $reply:ident $key:literal, $failure:literal
    ) => {
        Operation {
            path: $path,
            summary: $summary,
            input: $input,
            verb: Verb::$verb,
            endpoint: $endpoint,
            reply: Reply::$reply,
            key: $key,
            failure: $failure,
        }
    };
}

use Endpoint::{Collection, Fixed, Item, ItemAction};
use Resource::{Comments, Labels, Projects, Sections, Tasks};

const TASK_FIELDS: &[&str] = &[
    "content",
    "projectId",
    "dueString",
    "priority",
    "labels",
    "description",
    "order",
    "parentId",
    "sectionId",
    "assigneeId",
    "dueLang",
    "dueDate",
    "dueDatetime",
];

const PROJECT_ID: Param = Param {
    name: "projectId",
    remote: "project_id",
};
const TASK_ID: Param = Param {
    name: "taskId",
    remote: "task_id",
};
const LABEL: Param = Param {
    name: "label",
    remote: "label",
};
const OMIT_PERSONAL: Param = Param {
    name: "omitPersonal",
    remote: "omit_personal",
};

const BODY: Input = Input::Body {
    fields: None,
    required: Required::Nothing,
};

#[rustfmt::skip]
pub static OPERATIONS: &[Operation] = &[
    // Tasks
    op!("/listTasks", "List active tasks",
        Input::Filters(&[PROJECT_ID, LABEL]),
        Get Collection(Tasks) => Resource "tasks", "Failed to fetch tasks"),
    op!("/getTask", "Get a task", Input::Id("taskId"),
        Get Item(Tasks) => Resource "task", "Failed to fetch task"),
    op!("/createTask", "Create a task",
        Input::Body { fields: Some(TASK_FIELDS), required: Required::Nothing },
        Post Collection(Tasks) => Resource "task", "Failed to create task"),
    op!("/updateTask", "Update a task", Input::BodyWithId("taskId"),
        Post Item(Tasks) => Resource "success", "Failed to update task"),
    op!("/completeTask", "Close a task", Input::Id("taskId"),
        Post ItemAction(Tasks, "close") => Acknowledge "success", "Failed to complete task"),
    op!("/reopenTask", "Reopen a task", Input::Id("taskId"),
        Post ItemAction(Tasks, "reopen") => Acknowledge "success", "Failed to reopen task"),
    op!("/deleteTask", "Delete a task", Input::Id("taskId"),
        Delete Item(Tasks) => Acknowledge "success", "Failed to delete task"),
    // Projects
    op!("/listProjects", "List projects", Input::None,
        Get Collection(Projects) => Resource "projects", "Failed to fetch projects"),
    op!("/getProject", "Get a project", Input::Id("projectId"),
        Get Item(Projects) => Resource "project", "Failed to fetch project"),
    op!("/createProject", "Create a project", BODY,
        Post Collection(Projects) => Resource "project", "Failed to create project"),
    op!("/updateProject", "Update a project", Input::BodyWithId("projectId"),
        Post Item(Projects) => Resource "success", "Failed to update project"),
    op!("/archiveProject", "Archive a project", Input::Id("projectId"),
        Post ItemAction(Projects, "archive") => Acknowledge "success", "Failed to archive project"),
    op!("/unarchiveProject", "Unarchive a project", Input::Id("projectId"),
        Post ItemAction(Projects, "unarchive") => Acknowledge "success", "Failed to unarchive project"),
    op!("/deleteProject", "Delete a project", Input::Id("projectId"),
        Delete Item(Projects) => Acknowledge "success", "Failed to delete project"),
    op!("/getProjectCollaborators", "List collaborators of a shared project", Input::Id("projectId"),
        Get ItemAction(Projects, "collaborators") => Resource "collaborators", "Failed to fetch collaborators"),
    // Sections
    op!("/listSections", "List sections of a project",
        Input::Scope(PROJECT_ID),
        Get Collection(Sections) => Resource "sections", "Failed to fetch sections"),
    op!("/getSection", "Get a section", Input::Id("sectionId"),
        Get Item(Sections) => Resource "section", "Failed to fetch section"),
    op!("/createSection", "Create a section", BODY,
        Post Collection(Sections) => Resource "section", "Failed to create section"),
    op!("/updateSection", "Update a section", Input::BodyWithId("sectionId"),
        Post Item(Sections) => Resource "success", "Failed to update section"),
    op!("/deleteSection", "Delete a section", Input::Id("sectionId"),
        Delete Item(Sections) => Acknowledge "success", "Failed to delete section"),
    // Comments
    op!("/listComments", "List comments of a task or project",
        Input::OneOf(&[TASK_ID, PROJECT_ID]),
        Get Collection(Comments) => Resource "comments", "Failed to fetch comments"),
    op!("/getComment", "Get a comment", Input::Id("commentId"),
        Get Item(Comments) => Resource "comment", "Failed to fetch comment"),
    op!("/createComment", "Comment on a task or project",
        Input::Body { fields: None, required: Required::Any(&["taskId", "projectId"]) },
        Post Collection(Comments) => Resource "comment", "Failed to create comment"),
    op!("/updateComment", "Update a comment", Input::BodyWithId("commentId"),
        Post Item(Comments) => Resource "success", "Failed to update comment"),
    op!("/deleteComment", "Delete a comment", Input::Id("commentId"),
        Delete Item(Comments) => Acknowledge "success", "Failed to delete comment"),
    // Personal labels
    op!("/listLabels", "List personal labels", Input::None,
        Get Collection(Labels) => Resource "labels", "Failed to fetch labels"),
    op!("/getLabel", "Get a personal label", Input::Id("labelId"),
        Get Item(Labels) => Resource "label", "Failed to fetch label"),
    op!("/createLabel", "Create a personal label", BODY,
        Post Collection(Labels) => Resource "label", "Failed to create label"),
    op!("/updateLabel", "Update a personal label", Input::BodyWithId("labelId"),
        Post Item(Labels) => Resource "success", "Failed to update label"),
    op!("/deleteLabel", "Delete a personal label", Input::Id("labelId"),
        Delete Item(Labels) => Acknowledge "success", "Failed to delete label"),
    // Shared labels
    op!("/getSharedLabels", "List label names used on shared tasks",
        Input::Flag(OMIT_PERSONAL),
        Get Fixed(&["labels", "shared"]) => Raw "labels", "Failed to get shared labels"),
    op!("/renameSharedLabel", "Rename a shared label on every task",
        Input::Body { fields: Some(&["name", "newName"]), required: Required::All(&["name", "newName"]) },
        Post Fixed(&["labels", "shared", "rename"]) => Acknowledge "success", "Failed to rename shared label"),
    op!("/removeSharedLabel", "Remove a shared label from every task",
        Input::Body { fields: Some(&["name"]), required: Required::All(&["name"]) },
        Post Fixed(&["labels", "shared", "remove"]) => Acknowledge "success", "Failed to remove shared label"),
];

/// Look up the operation registered for an exact path.
#[cfg(test)]
pub(crate) fn find(path: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.path == path)
}
