use crate::domain::user::models::Role;

/// Whether a role may reach the admin surface at all (listings, role
/// updates, deletes).
pub fn can_manage_users(role: Role) -> bool {
    match role {
        Role::Admin | Role::SubAdmin => true,
        Role::Subscriber => false,
    }
}

/// Whether `actor` may update or delete a user holding `target` role.
///
/// Admins act on anyone; everyone else only on plain subscribers.
pub fn can_update_and_delete_user(actor: Role, target: Role) -> bool {
    match actor {
        Role::Admin => true,
        Role::SubAdmin | Role::Subscriber => target == Role::Subscriber,
    }
}
