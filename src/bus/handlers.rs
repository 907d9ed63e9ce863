use smallvec::SmallVec;

/// One channel's listeners, keyed by the id handed back on registration.
/// Iteration follows registration order; a channel usually holds one or two
/// listeners, so they are kept inline.
pub(crate) struct Handlers<H> {
  next_id: usize,
  items: SmallVec<[(usize, H); 2]>,
}

impl<H> Default for Handlers<H> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<H> Handlers<H> {
  /// Appends `handler`; ids are never reused within a channel.
  #[inline]
  pub(crate) fn add(&mut self, handler: H) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self.items.push((id, handler));
    id
  }

  pub(crate) fn remove(&mut self, id: usize) -> Option<H> {
    self.items.iter().position(|(i, _)| *i == id).map(|pos| self.items.remove(pos).1)
  }

  #[inline]
  pub(crate) fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub(crate) fn iter(&self) -> impl Iterator<Item = &H> { self.items.iter().map(|(_, h)| h) }
}
