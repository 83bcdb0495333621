use serenity::client::Context;
use serenity::model::guild::{Member, Role};
use serenity::model::permissions::Permissions;

/// display names for every permission flag the bot reports on
const PERMISSION_NAMES: &[(Permissions, &str)] = &[
    (Permissions::CREATE_INSTANT_INVITE, "Create Invite"),
    (Permissions::KICK_MEMBERS, "Kick Members"),
    (Permissions::BAN_MEMBERS, "Ban Members"),
    (Permissions::ADMINISTRATOR, "Administrator"),
    (Permissions::MANAGE_CHANNELS, "Manage Channels"),
    (Permissions::MANAGE_GUILD, "Manage Server"),
    (Permissions::ADD_REACTIONS, "Add Reactions"),
    (Permissions::VIEW_AUDIT_LOG, "View Audit Log"),
    (Permissions::PRIORITY_SPEAKER, "Priority Speaker"),
    (Permissions::STREAM, "Video"),
    (Permissions::VIEW_CHANNEL, "View Channels"),
    (Permissions::SEND_MESSAGES, "Send Messages"),
    (Permissions::SEND_TTS_MESSAGES, "Send Text-to-Speech Messages"),
    (Permissions::MANAGE_MESSAGES, "Manage Messages"),
    (Permissions::EMBED_LINKS, "Embed Links"),
    (Permissions::ATTACH_FILES, "Attach Files"),
    (Permissions::READ_MESSAGE_HISTORY, "Read Message History"),
    (Permissions::MENTION_EVERYONE, "Mention @everyone"),
    (Permissions::USE_EXTERNAL_EMOJIS, "Use External Emojis"),
    (Permissions::VIEW_GUILD_INSIGHTS, "View Server Insights"),
    (Permissions::CONNECT, "Connect"),
    (Permissions::SPEAK, "Speak"),
    (Permissions::MUTE_MEMBERS, "Mute Members"),
    (Permissions::DEAFEN_MEMBERS, "Deafen Members"),
    (Permissions::MOVE_MEMBERS, "Move Members"),
    (Permissions::USE_VAD, "Use Voice Activity"),
    (Permissions::CHANGE_NICKNAME, "Change Nickname"),
    (Permissions::MANAGE_NICKNAMES, "Manage Nicknames"),
    (Permissions::MANAGE_ROLES, "Manage Roles"),
    (Permissions::MANAGE_WEBHOOKS, "Manage Webhooks"),
    (Permissions::USE_APPLICATION_COMMANDS, "Use Application Commands"),
    (Permissions::REQUEST_TO_SPEAK, "Request to Speak"),
    (Permissions::MANAGE_EVENTS, "Manage Events"),
    (Permissions::MANAGE_THREADS, "Manage Threads"),
    (Permissions::CREATE_PUBLIC_THREADS, "Create Public Threads"),
    (Permissions::CREATE_PRIVATE_THREADS, "Create Private Threads"),
    (Permissions::USE_EXTERNAL_STICKERS, "Use External Stickers"),
    (Permissions::SEND_MESSAGES_IN_THREADS, "Send Messages in Threads"),
    (Permissions::MODERATE_MEMBERS, "Timeout Members"),
];

const UNKNOWN_PERMISSION: &str = "Unknown Permission";

/// display name for a single permission flag
pub fn permission_name(permission: Permissions) -> &'static str {
    PERMISSION_NAMES
        .iter()
        .find(|(flag, _)| *flag == permission)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_PERMISSION)
}

/// display names for every flag set in `permissions`, in table order
pub fn named_permissions(permissions: Permissions) -> Vec<&'static str> {
    PERMISSION_NAMES
        .iter()
        .filter(|(flag, _)| permissions.contains(*flag))
        .map(|(_, name)| *name)
        .collect()
}

/// names of the `required` flags that `held` does not cover
pub fn missing_permissions(held: Permissions, required: Permissions) -> Vec<&'static str> {
    PERMISSION_NAMES
        .iter()
        .filter(|(flag, _)| required.contains(*flag) && !held.contains(*flag))
        .map(|(_, name)| *name)
        .collect()
}

/// computes a member's effective permissions from the cached guild
pub fn member_permissions(ctx: &Context, member: &Member) -> Option<Permissions> {
    let guild = ctx.cache.guild(member.guild_id)?;
    Some(guild.member_permissions(member))
}

/// false when the guild is not cached or the member lacks the permission
pub fn member_has_permission(ctx: &Context, member: &Member, permission: Permissions) -> bool {
    member_permissions(ctx, member)
        .map(|held| held.contains(permission))
        .unwrap_or(false)
}

/// the member's highest role by position, ties broken by role ID
pub fn highest_role(ctx: &Context, member: &Member) -> Option<Role> {
    let guild = ctx.cache.guild(member.guild_id)?;
    member
        .roles
        .iter()
        .filter_map(|role_id| guild.roles.get(role_id))
        .max_by_key(|role| (role.position, role.id))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_name_known_flags() {
        assert_eq!(permission_name(Permissions::ADMINISTRATOR), "Administrator");
        assert_eq!(permission_name(Permissions::MANAGE_GUILD), "Manage Server");
        assert_eq!(
            permission_name(Permissions::MODERATE_MEMBERS),
            "Timeout Members"
        );
    }

    #[test]
    fn permission_name_unknown_flag() {
        let combined = Permissions::KICK_MEMBERS | Permissions::BAN_MEMBERS;
        assert_eq!(permission_name(combined), UNKNOWN_PERMISSION);
        assert_eq!(permission_name(Permissions::empty()), UNKNOWN_PERMISSION);
    }

    #[test]
    fn named_permissions_lists_set_flags() {
        let held = Permissions::SEND_MESSAGES | Permissions::CONNECT;
        assert_eq!(named_permissions(held), vec!["Send Messages", "Connect"]);
    }

    #[test]
    fn named_permissions_empty() {
        assert!(named_permissions(Permissions::empty()).is_empty());
    }

    #[test]
    fn missing_permissions_reports_gap() {
        let held = Permissions::SEND_MESSAGES;
        let required = Permissions::SEND_MESSAGES | Permissions::MANAGE_MESSAGES;
        assert_eq!(missing_permissions(held, required), vec!["Manage Messages"]);
    }

    #[test]
    fn missing_permissions_none_when_covered() {
        let held = Permissions::all();
        let required = Permissions::KICK_MEMBERS | Permissions::BAN_MEMBERS;
        assert!(missing_permissions(held, required).is_empty());
    }
}
