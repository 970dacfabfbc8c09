use crate::commands::{CmdCtx, CommandError, CommandHandler, CommandResult, CommandStatus};
use crate::db::Db;
use crate::db::repo::{ResourceRepo, ResourceRepository};
use crate::models::resource::{Resource, ResourceUpdate, non_empty, parse_building_id};
use async_trait::async_trait;
use std::sync::Arc;

pub const COMMAND_NAME: &str = "calendar-resource:resource:update";

#[derive(Debug, Clone, Default, clap::Args)]
pub struct UpdateResourceArgs {
    /// Unique identifier of the resource to update
    pub uid: String,

    /// Building the resource is located in (0 or non-numeric leaves it unchanged)
    #[arg(allow_negative_numbers = true)]
    pub building_id: Option<String>,

    /// Human readable name (eg: "Main Hall")
    pub display_name: Option<String>,

    /// Email address of the resource
    pub email: Option<String>,

    /// Kind of resource (eg: "room", "projector", "vehicle")
    pub resource_type: Option<String>,

    /// User ID of the person responsible for the resource
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    pub contact_person_user_id: Option<String>,
}

impl From<UpdateResourceArgs> for ResourceUpdate {
    fn from(args: UpdateResourceArgs) -> Self {
        let building_id = args.building_id.as_deref().and_then(|raw| {
            let id = parse_building_id(raw);
            if id.is_none() && !raw.is_empty() {
                tracing::debug!(raw, "ignoring building id without a non-zero leading integer");
            }
            id
        });

        Self {
            uid: args.uid,
            building_id,
            display_name: non_empty(args.display_name),
            email: non_empty(args.email),
            resource_type: non_empty(args.resource_type),
            contact_person_user_id: non_empty(args.contact_person_user_id),
        }
    }
}

pub struct UpdateResourceCommand {
    repo: Arc<dyn ResourceRepo>,
}

impl UpdateResourceCommand {
    pub fn new(repo: Arc<dyn ResourceRepo>) -> Self {
        Self { repo }
    }

    /// Connects to postgres (running pending migrations) and executes the command. A database
    /// that cannot be reached or migrated fails the update like any other persistence error.
    pub async fn connect_and_execute(ctx: &CmdCtx, database_url: &str, input: UpdateResourceArgs) -> CommandStatus {
        match Db::connect(database_url).await {
            Ok(db) => {
                let command = Self::new(Arc::new(ResourceRepository::new(db)));
                command.execute(ctx, input).await
            }
            Err(e) => report_failure(ctx, &input.uid, &CommandError::from(e)),
        }
    }

    async fn run(&self, update: ResourceUpdate) -> CommandResult<Resource> {
        Ok(self.repo.update(update).await?)
    }
}

fn report_failure(ctx: &CmdCtx, uid: &str, e: &CommandError) -> CommandStatus {
    tracing::error!(exception = ?e, %uid, "{e}");
    ctx.output.error(format!("Could not update entry: {e}"));
    CommandStatus::Failure
}

#[async_trait]
impl CommandHandler for UpdateResourceCommand {
    type Input = UpdateResourceArgs;

    const NAME: &'static str = COMMAND_NAME;
    const ABOUT: &'static str = "Update a general resource";

    async fn execute(&self, ctx: &CmdCtx, input: UpdateResourceArgs) -> CommandStatus {
        let update = ResourceUpdate::from(input);
        let uid = update.uid.clone();

        if update.is_noop() {
            tracing::debug!(%uid, "no fields given, only the update timestamp changes");
        }

        match self.run(update).await {
            Ok(resource) => {
                tracing::info!(%uid, id = %resource.id, "resource updated");
                ctx.output.info("Update a Resource with ID:");
                ctx.output.info(resource.id.to_string());
                CommandStatus::Success
            }
            Err(e) => report_failure(ctx, &uid, &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::BuildingId;
    use clap::FromArgMatches;

    fn parse(argv: &[&str]) -> UpdateResourceArgs {
        let matches = UpdateResourceCommand::configure()
            .try_get_matches_from(argv.iter().copied())
            .unwrap();
        UpdateResourceArgs::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn configure_names_the_command() {
        let cmd = UpdateResourceCommand::configure();
        assert_eq!(cmd.get_name(), "calendar-resource:resource:update");
        assert_eq!(cmd.get_about().map(|s| s.to_string()).as_deref(), Some("Update a general resource"));
    }

    #[test]
    fn configure_can_be_extended_with_process_args() {
        let matches = UpdateResourceCommand::configure()
            .arg(clap::Arg::new("database_url").long("database-url"))
            .try_get_matches_from(["update", "room-42", "3", "--database-url", "postgres://localhost/cal"])
            .unwrap();

        let args = UpdateResourceArgs::from_arg_matches(&matches).unwrap();
        assert_eq!(args.uid, "room-42");
        assert_eq!(args.building_id.as_deref(), Some("3"));
        assert_eq!(
            matches.get_one::<String>("database_url").map(String::as_str),
            Some("postgres://localhost/cal")
        );
    }

    #[test]
    fn positional_arguments_in_order() {
        let args = parse(&["update", "room-42", "3", "Main Hall", "hall@example.org", "room"]);
        assert_eq!(args.uid, "room-42");
        assert_eq!(args.building_id.as_deref(), Some("3"));
        assert_eq!(args.display_name.as_deref(), Some("Main Hall"));
        assert_eq!(args.email.as_deref(), Some("hall@example.org"));
        assert_eq!(args.resource_type.as_deref(), Some("room"));
        assert_eq!(args.contact_person_user_id, None);
    }

    #[test]
    fn uid_is_required() {
        assert!(UpdateResourceCommand::configure().try_get_matches_from(["update"]).is_err());
    }

    #[test]
    fn contact_person_option() {
        let args = parse(&["update", "room-42", "--contact-person-user-id", "alice"]);
        assert_eq!(args.contact_person_user_id.as_deref(), Some("alice"));

        let args = parse(&["update", "room-42", "--contact-person-user-id"]);
        assert_eq!(ResourceUpdate::from(args).contact_person_user_id, None);
    }

    #[test]
    fn only_uid_leaves_everything_unset() {
        let update = ResourceUpdate::from(parse(&["update", "room-42"]));
        assert_eq!(update, ResourceUpdate::new("room-42"));
        assert!(update.is_noop());
    }

    #[test]
    fn empty_uid_is_forwarded() {
        let update = ResourceUpdate::from(parse(&["update", ""]));
        assert_eq!(update.uid, "");
    }

    #[test]
    fn falsy_values_are_not_provided() {
        let update = ResourceUpdate::from(parse(&["update", "room-42", "0", "", "", ""]));
        assert!(update.is_noop());

        let update = ResourceUpdate::from(parse(&["update", "room-42", "east-wing"]));
        assert_eq!(update.building_id, None);
    }

    #[test]
    fn leading_integer_building_ids_are_kept() {
        let update = ResourceUpdate::from(parse(&["update", "room-42", "-4"]));
        assert_eq!(update.building_id, Some(BuildingId(-4)));

        let update = ResourceUpdate::from(parse(&["update", "room-42", "3rd"]));
        assert_eq!(update.building_id, Some(BuildingId(3)));
    }

    #[test]
    fn supplied_values_are_set_verbatim() {
        let update = ResourceUpdate::from(parse(&[
            "update",
            "room-42",
            "3",
            "Main Hall",
            "hall@example.org",
            "room",
            "--contact-person-user-id",
            "alice",
        ]));

        assert_eq!(
            update,
            ResourceUpdate {
                uid: "room-42".into(),
                building_id: Some(BuildingId(3)),
                display_name: Some("Main Hall".into()),
                email: Some("hall@example.org".into()),
                resource_type: Some("room".into()),
                contact_person_user_id: Some("alice".into()),
            }
        );
    }
}
