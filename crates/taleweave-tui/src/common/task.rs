use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Generate,
    Auth,
    StoriesFetch,
    SaveToggle,
    AudioFetch,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
        self.cancel = started.cancel.clone();
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub generate: TaskState,
    pub auth: TaskState,
    pub stories_fetch: TaskState,
    pub save_toggle: TaskState,
    pub audio_fetch: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Generate => &self.generate,
            TaskKind::Auth => &self.auth,
            TaskKind::StoriesFetch => &self.stories_fetch,
            TaskKind::SaveToggle => &self.save_toggle,
            TaskKind::AudioFetch => &self.audio_fetch,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Generate => &mut self.generate,
            TaskKind::Auth => &mut self.auth,
            TaskKind::StoriesFetch => &mut self.stories_fetch,
            TaskKind::SaveToggle => &mut self.save_toggle,
            TaskKind::AudioFetch => &mut self.audio_fetch,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.generate.is_running()
            || self.auth.is_running()
            || self.stories_fetch.is_running()
            || self.save_toggle.is_running()
            || self.audio_fetch.is_running()
    }
}
