use encore_domain::Surface;

use super::*;

impl AuthorizationService {
    /// Returns the surfaces the actor may open.
    ///
    /// A surface is accessible when the role holds at least one of the
    /// permissions required by that surface (logical OR).
    #[must_use]
    pub fn accessible_surfaces(&self, actor: &Actor) -> Vec<Surface> {
        self.policy.accessible_surfaces(actor.role())
    }

    /// Ensures the actor may open a surface.
    pub fn require_surface(&self, actor: &Actor, surface: Surface) -> AppResult<()> {
        if self.policy.can_access_surface(actor.role(), surface) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "subject '{}' with role '{}' cannot open '{}'",
            actor.subject(),
            actor.role(),
            surface.as_str()
        )))
    }
}
