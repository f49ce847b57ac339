use crate::context::{Context, ContextConfig, MatrixStackKind};
use crate::error::Result;
use crate::instructions::{Instruction, InstructionKind};

/// Stable handle to an instruction inside a [`Canvas`].
///
/// Ids are never reused within one canvas, so a handle to a removed
/// instruction simply stops resolving.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct InstructionId(u64);

#[derive(Debug)]
struct Entry {
    id: InstructionId,
    instruction: Instruction,
}

/// Ordered instruction sequence plus the context it replays into.
///
/// Authoring mutates instructions through [`get_mut`](Self::get_mut); each
/// change flags the canvas dirty. [`replay`](Self::replay) resets the context
/// and applies every instruction in order.
///
/// ```ignore
/// let mut canvas = Canvas::new();
/// canvas.add(Color::from_rgb(1.0, 0.0, 0.0));
/// canvas.add(PushMatrix::new());
/// let spin = canvas.add(Rotate::new(0.0, 0.0, 0.0, 1.0)?);
/// canvas.add(CanvasDraw::new(sprite));
/// canvas.add(PopMatrix::new());
///
/// canvas.get_mut::<Rotate>(spin).unwrap().set_angle(45.0)?;
/// canvas.draw_if_needed()?;
/// ```
#[derive(Debug)]
pub struct Canvas {
    context: Context,
    entries: Vec<Entry>,
    next_id: u64,
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    pub fn with_config(config: ContextConfig) -> Self {
        Self { context: Context::with_config(config), entries: Vec::new(), next_id: 0 }
    }

    #[inline]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Replaces the context's initial state. Flags the canvas dirty.
    pub fn set_config(&mut self, config: ContextConfig) {
        self.context.set_config(config);
    }

    // ── sequence editing ──────────────────────────────────────────────────

    /// Appends an instruction and attaches it to this canvas.
    pub fn add(&mut self, instruction: impl Into<Instruction>) -> InstructionId {
        let index = self.entries.len();
        self.insert(index, instruction)
    }

    /// Inserts at `index` (clamped to the current length).
    pub fn insert(&mut self, index: usize, instruction: impl Into<Instruction>) -> InstructionId {
        let mut instruction = instruction.into();
        instruction.attach(&self.context);

        let id = InstructionId(self.next_id);
        self.next_id += 1;

        let index = index.min(self.entries.len());
        self.entries.insert(index, Entry { id, instruction });
        self.context.post_update();
        id
    }

    /// Removes and detaches an instruction.
    pub fn remove(&mut self, id: InstructionId) -> Option<Instruction> {
        let index = self.position(id)?;
        let mut instruction = self.entries.remove(index).instruction;
        instruction.detach();
        self.context.post_update();
        Some(instruction)
    }

    /// Removes every instruction. Keeps allocated capacity.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        for entry in &mut self.entries {
            entry.instruction.detach();
        }
        self.entries.clear();
        self.context.post_update();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in replay order.
    pub fn ids(&self) -> impl Iterator<Item = InstructionId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Instructions in replay order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.entries.iter().map(|e| &e.instruction)
    }

    pub fn instruction(&self, id: InstructionId) -> Option<&Instruction> {
        self.position(id).map(|i| &self.entries[i].instruction)
    }

    pub fn instruction_mut(&mut self, id: InstructionId) -> Option<&mut Instruction> {
        let index = self.position(id)?;
        Some(&mut self.entries[index].instruction)
    }

    /// Typed access. `None` if the id is gone or names another kind.
    pub fn get<T: InstructionKind>(&self, id: InstructionId) -> Option<&T> {
        self.instruction(id).and_then(Instruction::downcast_ref::<T>)
    }

    pub fn get_mut<T: InstructionKind>(&mut self, id: InstructionId) -> Option<&mut T> {
        self.instruction_mut(id).and_then(Instruction::downcast_mut::<T>)
    }

    fn position(&self, id: InstructionId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    // ── replay ────────────────────────────────────────────────────────────

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.context.needs_redraw()
    }

    /// Total update posts, from structural edits and attached instructions.
    #[inline]
    pub fn update_count(&self) -> u64 {
        self.context.update_count()
    }

    /// Resets the context and applies every instruction in order.
    ///
    /// On error the context holds the state reached before the failing
    /// instruction, and the canvas stays dirty.
    pub fn replay(&mut self) -> Result<()> {
        log::debug!("replaying {} instructions", self.entries.len());
        self.context.reset();

        for (index, entry) in self.entries.iter().enumerate() {
            log::trace!("apply #{index} {}", entry.instruction.name());
            if let Err(err) = entry.instruction.apply(&mut self.context) {
                log::error!("replay failed at #{index} ({}): {err}", entry.instruction.name());
                return Err(err);
            }
        }

        for kind in [MatrixStackKind::ModelView, MatrixStackKind::Projection] {
            let depth = self.context.matrix_stack(kind).depth();
            if depth != 0 {
                log::warn!("replay left {depth} unmatched push(es) on the {kind} stack");
            }
        }

        self.context.update_signal().clear();
        Ok(())
    }

    /// Replays only if something changed since the last successful replay.
    pub fn draw_if_needed(&mut self) -> Result<bool> {
        if !self.needs_redraw() {
            return Ok(false);
        }
        self.replay()?;
        Ok(true)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::context::ContextKey;
    use crate::error::GraphicsError;
    use crate::instructions::{
        CanvasDraw, Color, Drawable, LineWidth, MatrixInstruction, PopMatrix, PopState, PushMatrix,
        PushState, Rotate, Scale, Transform, Translate,
    };
    use crate::math::{self, Matrix4};

    /// Appends its name to a shared log when drawn.
    struct Marker {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Drawable for Marker {
        fn draw(&self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    // ── replay ────────────────────────────────────────────────────────────

    #[test]
    fn replayed_color_reaches_context() {
        let mut canvas = Canvas::new();
        canvas.add(Color::from_rgba(1.0, 0.0, 0.0, 1.0));
        canvas.replay().unwrap();
        assert_eq!(canvas.context().color(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn later_instructions_see_earlier_state() {
        let mut canvas = Canvas::new();
        canvas.add(LineWidth::new(2.0).unwrap());
        canvas.add(LineWidth::new(5.0).unwrap());
        canvas.replay().unwrap();
        assert_eq!(canvas.context().line_width(), 5.0);
    }

    #[test]
    fn replay_is_deterministic() {
        let mut canvas = Canvas::new();
        canvas.add(Translate::new(1.0, 0.0, 0.0).unwrap());
        canvas.add(Scale::new(2.0).unwrap());
        canvas.replay().unwrap();
        let first = canvas.context().model_view_matrix();
        canvas.replay().unwrap();
        assert_eq!(canvas.context().model_view_matrix(), first);
        assert_eq!(first, math::multiply(math::translation(1.0, 0.0, 0.0), math::scale(2.0, 2.0, 2.0)));
    }

    #[test]
    fn scoped_transform_does_not_leak() {
        let mut canvas = Canvas::new();
        canvas.add(PushMatrix::new());
        canvas.add(Rotate::new(30.0, 0.0, 0.0, 1.0).unwrap());
        canvas.add(PopMatrix::new());
        canvas.replay().unwrap();
        assert_eq!(canvas.context().model_view_matrix(), Matrix4::IDENTITY);
    }

    #[test]
    fn drawables_run_in_sequence_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut canvas = Canvas::new();
        canvas.add(CanvasDraw::new(Rc::new(Marker { name: "a", log: log.clone() })));
        canvas.add(Color::new());
        canvas.add(CanvasDraw::new(Rc::new(Marker { name: "b", log: log.clone() })));
        canvas.replay().unwrap();
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn unbalanced_pop_fails_fast() {
        let mut canvas = Canvas::new();
        canvas.add(LineWidth::new(3.0).unwrap());
        canvas.add(PopMatrix::new());
        canvas.add(LineWidth::new(9.0).unwrap());

        let err = canvas.replay().unwrap_err();
        assert_eq!(err, GraphicsError::ImbalancedMatrixStack { stack: MatrixStackKind::ModelView });
        assert_eq!(canvas.context().line_width(), 3.0);
        assert!(canvas.needs_redraw());
    }

    #[test]
    fn pop_state_listing_a_key_twice_needs_two_saves() {
        let mut canvas = Canvas::new();
        canvas.add(PushState::new([ContextKey::Color]));
        canvas.add(Color::from_rgb(0.0, 1.0, 0.0));
        canvas.add(PopState::new([ContextKey::Color, ContextKey::Color]));

        let err = canvas.replay().unwrap_err();
        assert_eq!(err, GraphicsError::ImbalancedStateStack { key: ContextKey::Color });
        assert_eq!(canvas.context().color(), [0.0, 1.0, 0.0, 1.0]);
        assert!(canvas.needs_redraw());
    }

    #[test]
    fn non_finite_matrices_never_enter_the_canvas() {
        let mut canvas = Canvas::new();
        let id = canvas.add(Transform::new());
        let nan = Matrix4::from_cols_array_2d(&[[f32::NAN; 4]; 4]);
        assert!(canvas.get_mut::<Transform>(id).unwrap().transform(nan).is_err());
        assert!(MatrixInstruction::from_matrix(math::scale(f32::INFINITY, 1.0, 1.0)).is_err());

        canvas.replay().unwrap();
        assert!(canvas.context().model_view_matrix().is_finite());
    }

    #[test]
    fn transform_composed_once_applies_once() {
        let mut canvas = Canvas::new();
        let id = canvas.add(Transform::new());
        {
            let t = canvas.get_mut::<Transform>(id).unwrap();
            t.identity();
            t.translate(1.0, 0.0, 0.0).unwrap();
            t.rotate(90.0, 0.0, 0.0, 1.0).unwrap();
        }
        canvas.replay().unwrap();
        let expected = math::multiply(
            math::multiply(math::identity(), math::translation(1.0, 0.0, 0.0)),
            math::rotation(90.0, [0.0, 0.0, 1.0]),
        );
        assert_eq!(canvas.context().model_view_matrix(), expected);
    }

    // ── dirty tracking ────────────────────────────────────────────────────

    #[test]
    fn mutation_flags_dirty_without_replaying() {
        let mut canvas = Canvas::new();
        let id = canvas.add(Rotate::default());
        canvas.replay().unwrap();
        assert!(!canvas.needs_redraw());

        canvas.get_mut::<Rotate>(id).unwrap().set_angle(90.0).unwrap();
        assert!(canvas.needs_redraw());
        // the context still holds the previous replay's result
        assert_eq!(canvas.context().model_view_matrix(), math::rotation(0.0, [0.0, 0.0, 1.0]));

        assert!(canvas.draw_if_needed().unwrap());
        assert_eq!(canvas.context().model_view_matrix(), math::rotation(90.0, [0.0, 0.0, 1.0]));
        assert!(!canvas.draw_if_needed().unwrap());
    }

    #[test]
    fn one_post_per_logical_change() {
        let mut canvas = Canvas::new();
        let id = canvas.add(Translate::default());
        let base = canvas.update_count();

        let t = canvas.get_mut::<Translate>(id).unwrap();
        t.set_xyz([1.0, 2.0, 3.0]).unwrap();
        t.set_xy([4.0, 5.0]).unwrap();
        assert_eq!(canvas.update_count(), base + 2);
    }

    #[test]
    fn replay_does_not_post() {
        let mut canvas = Canvas::new();
        canvas.add(Color::from_rgb(0.0, 1.0, 0.0));
        let before = canvas.update_count();
        canvas.replay().unwrap();
        assert_eq!(canvas.update_count(), before);
    }

    // ── editing ───────────────────────────────────────────────────────────

    #[test]
    fn insert_places_instruction_before_index() {
        let mut canvas = Canvas::new();
        let last = canvas.add(LineWidth::new(1.0).unwrap());
        let first = canvas.insert(0, LineWidth::new(7.0).unwrap());
        assert_eq!(canvas.ids().collect::<Vec<_>>(), vec![first, last]);
        canvas.replay().unwrap();
        assert_eq!(canvas.context().line_width(), 1.0);
    }

    #[test]
    fn removed_instruction_is_detached() {
        let mut canvas = Canvas::new();
        let id = canvas.add(Color::from_rgb(1.0, 0.0, 0.0));
        let mut removed = canvas.remove(id).unwrap();
        assert!(!removed.is_attached());
        assert!(canvas.get::<Color>(id).is_none());

        let before = canvas.update_count();
        removed.downcast_mut::<Color>().unwrap().set_r(0.5);
        assert_eq!(canvas.update_count(), before);
    }

    #[test]
    fn clear_empties_and_flags_dirty() {
        let mut canvas = Canvas::new();
        canvas.add(Color::new());
        canvas.replay().unwrap();
        canvas.clear();
        assert!(canvas.is_empty());
        assert!(canvas.needs_redraw());
    }

    #[test]
    fn ids_keep_increasing_after_removal() {
        let mut canvas = Canvas::new();
        let a = canvas.add(LineWidth::default());
        canvas.remove(a).unwrap();
        let b = canvas.add(LineWidth::default());
        assert!(b > a);
        assert!(canvas.instruction(a).is_none());
        assert!(canvas.instruction(b).is_some());
    }

    #[test]
    fn get_with_wrong_kind_is_none() {
        let mut canvas = Canvas::new();
        let id = canvas.add(Scale::new(2.0).unwrap());
        assert!(canvas.get::<Rotate>(id).is_none());
        assert_eq!(canvas.get::<Scale>(id).unwrap().scale(), 2.0);
    }

    #[test]
    fn instruction_attached_elsewhere_is_rejected() {
        let other = Canvas::new();
        let mut color: Instruction = Color::new().into();
        color.attach(other.context());

        let mut ctx = Context::new();
        assert!(matches!(
            color.apply(&mut ctx),
            Err(GraphicsError::UnboundContext { instruction: "Color" })
        ));
    }
}
