//! OpenAPI document generated from the operation table.

use utoipa::openapi::{
    OpenApi, OpenApiBuilder, Required,
    info::InfoBuilder,
    path::{HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn, PathItem, PathsBuilder},
    request_body::RequestBodyBuilder,
    response::ResponseBuilder,
};

use super::operations::{OPERATIONS, Operation};

/// Build the OpenAPI document served at `/docs`.
pub fn openapi() -> OpenApi {
    let paths = OPERATIONS
        .iter()
        .fold(PathsBuilder::new(), |paths, op| {
            paths.path(op.path, path_item(op))
        })
        .build();

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title("Todoist Gateway")
                .version(env!("CARGO_PKG_VERSION"))
                .description(Some(
                    "Task, project, section, comment and label operations proxied to the Todoist REST API",
                ))
                .build(),
        )
        .paths(paths)
        .build()
}

fn path_item(op: &Operation) -> PathItem {
    let method = if op.is_read() {
        HttpMethod::Get
    } else {
        HttpMethod::Post
    };

    let mut operation = OperationBuilder::new()
        .operation_id(Some(op.path.trim_start_matches('/')))
        .summary(Some(op.summary))
        .tags(Some([op.endpoint.resource_name()]))
        .response(
            "200",
            ResponseBuilder::new()
                .description(format!("JSON object with key `{}`", op.key))
                .build(),
        )
        .response("500", ResponseBuilder::new().description(op.failure).build());

    for (name, required) in op.input.query_params() {
        operation = operation.parameter(
            ParameterBuilder::new()
                .name(name)
                .parameter_in(ParameterIn::Query)
                .required(if required {
                    Required::True
                } else {
                    Required::False
                })
                .build(),
        );
    }
    if op.input.takes_body() {
        operation = operation.request_body(Some(
            RequestBodyBuilder::new()
                .description(Some("JSON object with camelCase fields"))
                .required(Some(Required::True))
                .build(),
        ));
    }
    if op.input.can_reject() {
        operation = operation.response(
            "400",
            ResponseBuilder::new()
                .description("A required parameter is missing")
                .build(),
        );
    }

    PathItem::new(method, operation.build())
}
